mod inmemory;
mod postgres;

pub use inmemory::InMemoryEnrollmentRepo;
pub use postgres::PostgresEnrollmentRepo;

use campus_scheduler_domain::{Enrollment, ID};

/// Enrollment and submission ledger. A submitted assignment must never
/// generate a reminder, so the scan checks `has_submission` per triple.
#[async_trait::async_trait]
pub trait IEnrollmentRepo: Send + Sync {
    async fn insert(&self, enrollment: &Enrollment) -> anyhow::Result<()>;
    async fn is_enrolled(&self, user_id: &ID, course_id: &ID) -> anyhow::Result<bool>;
    async fn has_submission(&self, user_id: &ID, assignment_id: &ID) -> anyhow::Result<bool>;
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Enrollment>>;
}
