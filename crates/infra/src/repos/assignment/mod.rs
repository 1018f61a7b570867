mod inmemory;
mod postgres;

pub use inmemory::InMemoryAssignmentRepo;
pub use postgres::PostgresAssignmentRepo;

use campus_scheduler_domain::{Assignment, AssignmentWithCourse};
use chrono::{DateTime, Utc};

/// Catalog of assignments, read-only to the reminder scan apart from
/// the seeding `insert`.
#[async_trait::async_trait]
pub trait IAssignmentRepo: Send + Sync {
    async fn insert(&self, assignment: &Assignment) -> anyhow::Result<()>;
    /// All active assignments with `start <= due_at < end`, joined with
    /// their parent course.
    async fn find_active_due_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> anyhow::Result<Vec<AssignmentWithCourse>>;
}
