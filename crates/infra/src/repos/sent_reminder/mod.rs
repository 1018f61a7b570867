mod inmemory;
mod postgres;

pub use inmemory::InMemorySentReminderRepo;
pub use postgres::PostgresSentReminderRepo;

use campus_scheduler_domain::ReminderEvent;

/// De-duplication ledger for dispatched reminders. Consulted before a
/// send and written after a successful one, so re-running the scan at
/// any cadence cannot resend the same (user, assignment, lead-time)
/// tuple.
#[async_trait::async_trait]
pub trait ISentReminderRepo: Send + Sync {
    async fn contains(&self, event: &ReminderEvent) -> anyhow::Result<bool>;
    async fn insert(&self, event: &ReminderEvent) -> anyhow::Result<()>;
}
