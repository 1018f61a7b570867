use crate::shared::usecase::UseCase;
use campus_scheduler_domain::ReminderTriple;
use campus_scheduler_infra::{degraded_repos, Context, Repos};
use chrono::offset::LocalResult;
use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::warn;

/// Computes the set of (user, course, assignment) triples owed a
/// reminder for one lead-time value. Pure with respect to store state
/// and the injected clock; repeated runs over unchanged data yield the
/// same set.
#[derive(Debug)]
pub struct MatchDueAssignmentsUseCase {
    pub lead_time_days: u32,
}

#[derive(Debug)]
pub struct MatchOutcome {
    pub triples: Vec<ReminderTriple>,
    /// True when the primary store was unreachable and the triples come
    /// from the synthetic degraded dataset.
    pub degraded: bool,
}

#[derive(Debug)]
pub enum UseCaseError {}

/// The UTC window covering the calendar day `lead_time_days` days from
/// `now` in the given timezone. Inclusive start, exclusive end: an
/// assignment due exactly at midnight belongs to the day whose start
/// equals that instant.
pub fn day_window(now: DateTime<Utc>, tz: &Tz, lead_time_days: u32) -> (DateTime<Utc>, DateTime<Utc>) {
    let target_day = now.with_timezone(tz).date_naive() + Duration::days(lead_time_days as i64);
    (
        start_of_day_utc(target_day, tz),
        start_of_day_utc(target_day + Duration::days(1), tz),
    )
}

fn start_of_day_utc(day: chrono::NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let naive = day.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        // DST transition at midnight, take the earlier mapping
        LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        // Midnight skipped by a DST gap, fall back to the UTC reading
        LocalResult::None => Utc.from_utc_datetime(&naive),
    }
}

/// The matching algorithm itself, free of any infrastructure concerns:
/// it runs identically over the primary and the degraded store handle.
async fn match_in_store(
    repos: &Repos,
    now: DateTime<Utc>,
    tz: &Tz,
    lead_time_days: u32,
) -> anyhow::Result<Vec<ReminderTriple>> {
    let (start, end) = day_window(now, tz, lead_time_days);
    let assignments = repos.assignments.find_active_due_between(start, end).await?;
    let users = repos.users.find_reminder_enabled().await?;

    let mut triples = Vec::new();
    for entry in &assignments {
        for user in &users {
            if !user
                .reminder_preference
                .lead_times
                .contains(&lead_time_days)
            {
                continue;
            }
            if !repos
                .enrollments
                .is_enrolled(&user.id, &entry.course.id)
                .await?
            {
                continue;
            }
            if repos
                .enrollments
                .has_submission(&user.id, &entry.assignment.id)
                .await?
            {
                continue;
            }
            triples.push(ReminderTriple {
                user: user.clone(),
                course: entry.course.clone(),
                assignment: entry.assignment.clone(),
            });
        }
    }
    Ok(triples)
}

#[async_trait::async_trait(?Send)]
impl UseCase for MatchDueAssignmentsUseCase {
    type Response = MatchOutcome;

    type Error = UseCaseError;

    const NAME: &'static str = "MatchDueAssignments";

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.now();
        let tz = &ctx.config.scheduler_timezone;

        match match_in_store(&ctx.repos, now, tz, self.lead_time_days).await {
            Ok(triples) => Ok(MatchOutcome {
                triples,
                degraded: false,
            }),
            Err(e) => {
                warn!(
                    "Primary store unavailable for lead time {} scan: {:?}. Using the degraded dataset for this invocation.",
                    self.lead_time_days, e
                );
                let repos =
                    degraded_repos(now, self.lead_time_days, &ctx.config.fallback_email).await;
                // The degraded store is in-memory, its queries cannot fail
                let triples = match_in_store(&repos, now, tz, self.lead_time_days)
                    .await
                    .unwrap_or_default();
                Ok(MatchOutcome {
                    triples,
                    degraded: true,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;
    use campus_scheduler_domain::{
        Assignment, AssignmentKind, AssignmentWithCourse, Course, Enrollment, ReminderPreference,
        Submission, User, ID,
    };
    use campus_scheduler_infra::{IAssignmentRepo, ISys, IUserRepo};
    use std::sync::Arc;

    pub struct StaticTimeSys;
    impl ISys for StaticTimeSys {
        fn now(&self) -> DateTime<Utc> {
            // Sun Feb 21 2021 08:30:00 UTC
            Utc.with_ymd_and_hms(2021, 2, 21, 8, 30, 0).unwrap()
        }
    }

    struct BrokenAssignmentRepo;
    #[async_trait::async_trait]
    impl IAssignmentRepo for BrokenAssignmentRepo {
        async fn insert(&self, _assignment: &Assignment) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("store unreachable"))
        }
        async fn find_active_due_between(
            &self,
            _start: DateTime<Utc>,
            _end: DateTime<Utc>,
        ) -> anyhow::Result<Vec<AssignmentWithCourse>> {
            Err(anyhow::anyhow!("store unreachable"))
        }
    }

    struct BrokenUserRepo;
    #[async_trait::async_trait]
    impl IUserRepo for BrokenUserRepo {
        async fn insert(&self, _user: &User) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("store unreachable"))
        }
        async fn find(&self, _user_id: &ID) -> Option<User> {
            None
        }
        async fn find_reminder_enabled(&self) -> anyhow::Result<Vec<User>> {
            Err(anyhow::anyhow!("store unreachable"))
        }
    }

    fn setup_ctx() -> Context {
        let mut ctx = Context::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys);
        ctx
    }

    async fn insert_assignment(
        ctx: &Context,
        course: &Course,
        due_at: DateTime<Utc>,
    ) -> Assignment {
        let assignment = Assignment {
            id: Default::default(),
            course_id: course.id.clone(),
            title: "Ownership Quiz".into(),
            kind: AssignmentKind::Quiz,
            max_score: 25.0,
            due_at,
            active: true,
        };
        ctx.repos.assignments.insert(&assignment).await.unwrap();
        assignment
    }

    async fn insert_enrolled_user(ctx: &Context, course: &Course, email: &str) -> User {
        let user = User::new(email, "Test Student");
        ctx.repos.users.insert(&user).await.unwrap();
        ctx.repos
            .enrollments
            .insert(&Enrollment::new(user.id.clone(), course.id.clone()))
            .await
            .unwrap();
        user
    }

    async fn matched_triples(ctx: &Context, lead_time_days: u32) -> MatchOutcome {
        match execute(MatchDueAssignmentsUseCase { lead_time_days }, ctx).await {
            Ok(outcome) => outcome,
            Err(e) => match e {},
        }
    }

    #[actix_web::test]
    async fn matches_assignment_due_at_any_time_of_target_day() {
        let ctx = setup_ctx();
        let course = Course::new("Rust Programming");
        ctx.repos.courses.insert(&course).await.unwrap();
        let user = insert_enrolled_user(&ctx, &course, "ada@campus.test").await;

        // Tomorrow at noon and tomorrow exactly at midnight
        insert_assignment(
            &ctx,
            &course,
            Utc.with_ymd_and_hms(2021, 2, 22, 12, 0, 0).unwrap(),
        )
        .await;
        insert_assignment(
            &ctx,
            &course,
            Utc.with_ymd_and_hms(2021, 2, 22, 0, 0, 0).unwrap(),
        )
        .await;
        // Due today, outside the 1-day window
        insert_assignment(
            &ctx,
            &course,
            Utc.with_ymd_and_hms(2021, 2, 21, 23, 0, 0).unwrap(),
        )
        .await;

        let outcome = matched_triples(&ctx, 1).await;
        assert!(!outcome.degraded);
        assert_eq!(outcome.triples.len(), 2);
        for triple in &outcome.triples {
            assert_eq!(triple.user.id, user.id);
            assert_eq!(triple.course.id, course.id);
        }
    }

    #[actix_web::test]
    async fn repeated_match_returns_the_same_set() {
        let ctx = setup_ctx();
        let course = Course::new("Rust Programming");
        ctx.repos.courses.insert(&course).await.unwrap();
        insert_enrolled_user(&ctx, &course, "ada@campus.test").await;
        insert_assignment(
            &ctx,
            &course,
            Utc.with_ymd_and_hms(2021, 2, 24, 9, 0, 0).unwrap(),
        )
        .await;

        let first = matched_triples(&ctx, 3).await;
        let second = matched_triples(&ctx, 3).await;
        assert_eq!(first.triples.len(), 1);

        let mut first_ids: Vec<_> = first
            .triples
            .iter()
            .map(|t| (t.user.id.clone(), t.assignment.id.clone()))
            .collect();
        let mut second_ids: Vec<_> = second
            .triples
            .iter()
            .map(|t| (t.user.id.clone(), t.assignment.id.clone()))
            .collect();
        first_ids.sort();
        second_ids.sort();
        assert_eq!(first_ids, second_ids);
    }

    #[actix_web::test]
    async fn excludes_users_without_matching_lead_time() {
        let ctx = setup_ctx();
        let course = Course::new("Rust Programming");
        ctx.repos.courses.insert(&course).await.unwrap();

        let mut user = User::new("ada@campus.test", "Ada Lovelace");
        user.reminder_preference = ReminderPreference {
            enabled: true,
            lead_times: vec![3, 7].into_iter().collect(),
        };
        ctx.repos.users.insert(&user).await.unwrap();
        ctx.repos
            .enrollments
            .insert(&Enrollment::new(user.id.clone(), course.id.clone()))
            .await
            .unwrap();

        insert_assignment(
            &ctx,
            &course,
            Utc.with_ymd_and_hms(2021, 2, 22, 12, 0, 0).unwrap(),
        )
        .await;

        let outcome = matched_triples(&ctx, 1).await;
        assert!(outcome.triples.is_empty());
    }

    #[actix_web::test]
    async fn excludes_users_with_reminders_disabled() {
        let ctx = setup_ctx();
        let course = Course::new("Rust Programming");
        ctx.repos.courses.insert(&course).await.unwrap();

        let mut user = User::new("ada@campus.test", "Ada Lovelace");
        user.reminder_preference.enabled = false;
        ctx.repos.users.insert(&user).await.unwrap();
        ctx.repos
            .enrollments
            .insert(&Enrollment::new(user.id.clone(), course.id.clone()))
            .await
            .unwrap();

        insert_assignment(
            &ctx,
            &course,
            Utc.with_ymd_and_hms(2021, 2, 22, 12, 0, 0).unwrap(),
        )
        .await;

        let outcome = matched_triples(&ctx, 1).await;
        assert!(outcome.triples.is_empty());
    }

    #[actix_web::test]
    async fn excludes_pairs_with_a_submission_on_record() {
        let ctx = setup_ctx();
        let course = Course::new("Rust Programming");
        ctx.repos.courses.insert(&course).await.unwrap();

        let user = User::new("ada@campus.test", "Ada Lovelace");
        ctx.repos.users.insert(&user).await.unwrap();

        let assignment = insert_assignment(
            &ctx,
            &course,
            Utc.with_ymd_and_hms(2021, 2, 24, 9, 0, 0).unwrap(),
        )
        .await;

        let mut enrollment = Enrollment::new(user.id.clone(), course.id.clone());
        enrollment.submissions.push(Submission {
            assignment_id: assignment.id.clone(),
            submitted_at: Utc.with_ymd_and_hms(2021, 2, 20, 10, 0, 0).unwrap(),
            score: None,
        });
        ctx.repos.enrollments.insert(&enrollment).await.unwrap();

        for lead_time_days in [1, 3, 7] {
            let outcome = matched_triples(&ctx, lead_time_days).await;
            assert!(outcome.triples.is_empty());
        }
    }

    #[actix_web::test]
    async fn excludes_users_not_enrolled_in_the_course() {
        let ctx = setup_ctx();
        let course = Course::new("Rust Programming");
        ctx.repos.courses.insert(&course).await.unwrap();

        let user = User::new("ada@campus.test", "Ada Lovelace");
        ctx.repos.users.insert(&user).await.unwrap();

        insert_assignment(
            &ctx,
            &course,
            Utc.with_ymd_and_hms(2021, 2, 22, 12, 0, 0).unwrap(),
        )
        .await;

        let outcome = matched_triples(&ctx, 1).await;
        assert!(outcome.triples.is_empty());
    }

    #[actix_web::test]
    async fn falls_back_to_degraded_dataset_when_stores_are_unreachable() {
        let mut ctx = setup_ctx();
        ctx.repos.assignments = Arc::new(BrokenAssignmentRepo);
        ctx.repos.users = Arc::new(BrokenUserRepo);

        let outcome = matched_triples(&ctx, 3).await;
        assert!(outcome.degraded);
        assert_eq!(outcome.triples.len(), 1);
        assert_eq!(outcome.triples[0].user.email, ctx.config.fallback_email);
    }

    #[test]
    fn window_starts_at_midnight_of_the_target_day() {
        let now = Utc.with_ymd_and_hms(2021, 2, 21, 8, 30, 0).unwrap();
        let (start, end) = day_window(now, &chrono_tz::Tz::UTC, 1);
        assert_eq!(start, Utc.with_ymd_and_hms(2021, 2, 22, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2021, 2, 23, 0, 0, 0).unwrap());
    }

    #[test]
    fn window_respects_the_configured_timezone() {
        let now = Utc.with_ymd_and_hms(2021, 6, 10, 12, 0, 0).unwrap();
        let (start, end) = day_window(now, &chrono_tz::Europe::Oslo, 3);
        // Oslo is UTC+2 in June, its midnight is 22:00 UTC the day before
        assert_eq!(start, Utc.with_ymd_and_hms(2021, 6, 12, 22, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2021, 6, 13, 22, 0, 0).unwrap());
    }
}
