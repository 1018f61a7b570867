mod assignment;
mod course;
mod enrollment;
mod sent_reminder;
mod shared;
mod user;

use assignment::{InMemoryAssignmentRepo, PostgresAssignmentRepo};
use course::{InMemoryCourseRepo, PostgresCourseRepo};
use enrollment::{InMemoryEnrollmentRepo, PostgresEnrollmentRepo};
use sent_reminder::{InMemorySentReminderRepo, PostgresSentReminderRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use user::{InMemoryUserRepo, PostgresUserRepo};

pub use assignment::IAssignmentRepo;
pub use course::ICourseRepo;
pub use enrollment::IEnrollmentRepo;
pub use sent_reminder::ISentReminderRepo;
pub use user::IUserRepo;

use campus_scheduler_domain::{Assignment, AssignmentKind, Course, Enrollment, User};
use chrono::{DateTime, Duration, Utc};

#[derive(Clone)]
pub struct Repos {
    pub courses: Arc<dyn ICourseRepo>,
    pub assignments: Arc<dyn IAssignmentRepo>,
    pub users: Arc<dyn IUserRepo>,
    pub enrollments: Arc<dyn IEnrollmentRepo>,
    pub sent_reminders: Arc<dyn ISentReminderRepo>,
}

impl Repos {
    pub async fn create_postgres(
        connection_string: &str,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            courses: Arc::new(PostgresCourseRepo::new(pool.clone())),
            assignments: Arc::new(PostgresAssignmentRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            enrollments: Arc::new(PostgresEnrollmentRepo::new(pool.clone())),
            sent_reminders: Arc::new(PostgresSentReminderRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        let courses: Arc<dyn ICourseRepo> = Arc::new(InMemoryCourseRepo::new());
        Self {
            assignments: Arc::new(InMemoryAssignmentRepo::new(courses.clone())),
            courses,
            users: Arc::new(InMemoryUserRepo::new()),
            enrollments: Arc::new(InMemoryEnrollmentRepo::new()),
            sent_reminders: Arc::new(InMemorySentReminderRepo::new()),
        }
    }
}

/// Synthetic dataset used when the primary store is unreachable: one
/// course, one assignment due exactly `lead_time_days` from `now` and
/// one enrolled fallback user. Nothing here is persisted or reconciled
/// with the primary store once it returns.
pub async fn degraded_repos(
    now: DateTime<Utc>,
    lead_time_days: u32,
    fallback_email: &str,
) -> Repos {
    let repos = Repos::create_inmemory();

    let course = Course::new("Degraded Mode Course");
    let assignment = Assignment {
        id: Default::default(),
        course_id: course.id.clone(),
        title: "Degraded Mode Assignment".into(),
        kind: AssignmentKind::Assignment,
        max_score: 100.0,
        due_at: now + Duration::days(lead_time_days as i64),
        active: true,
    };
    let mut user = User::new(fallback_email, "Degraded Mode User");
    // Guarantee a match for whatever lead time this scan runs with
    user.reminder_preference.lead_times.insert(lead_time_days);
    let enrollment = Enrollment::new(user.id.clone(), course.id.clone());

    // In-memory inserts cannot fail
    let _ = repos.courses.insert(&course).await;
    let _ = repos.assignments.insert(&assignment).await;
    let _ = repos.users.insert(&user).await;
    let _ = repos.enrollments.insert(&enrollment).await;

    repos
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn degraded_dataset_contains_one_matchable_triple() {
        let now = Utc::now();
        let repos = degraded_repos(now, 2, "fallback@campus.local").await;

        let assignments = repos
            .assignments
            .find_active_due_between(now, now + Duration::days(3))
            .await
            .unwrap();
        assert_eq!(assignments.len(), 1);

        let users = repos.users.find_reminder_enabled().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "fallback@campus.local");
        assert!(users[0].reminder_preference.lead_times.contains(&2));

        assert!(repos
            .enrollments
            .is_enrolled(&users[0].id, &assignments[0].course.id)
            .await
            .unwrap());
        assert!(!repos
            .enrollments
            .has_submission(&users[0].id, &assignments[0].assignment.id)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn sent_reminder_ledger_remembers_events() {
        let repos = Repos::create_inmemory();
        let event = campus_scheduler_domain::ReminderEvent {
            user_id: Default::default(),
            assignment_id: Default::default(),
            lead_time_days: 1,
        };

        assert!(!repos.sent_reminders.contains(&event).await.unwrap());
        repos.sent_reminders.insert(&event).await.unwrap();
        assert!(repos.sent_reminders.contains(&event).await.unwrap());
    }
}

