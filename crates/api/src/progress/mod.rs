use crate::shared::usecase::UseCase;
use campus_scheduler_infra::Context;
use chrono::Duration;
use tracing::error;

/// Weekly aggregate-progress report, driven by its own timer and sent
/// through the same delivery channel as the reminders. Independent of
/// the reminder scan; overlap between the two jobs is fine since both
/// only read.
#[derive(Debug)]
pub struct SendWeeklyProgressUseCase;

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendWeeklyProgressUseCase {
    /// Number of reports delivered
    type Response = usize;

    type Error = UseCaseError;

    const NAME: &'static str = "SendWeeklyProgress";

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.now();
        let week_ago = now - Duration::days(7);

        let users = ctx
            .repos
            .users
            .find_reminder_enabled()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut delivered = 0;
        for user in users {
            let enrollments = match ctx.repos.enrollments.find_by_user(&user.id).await {
                Ok(enrollments) => enrollments,
                Err(e) => {
                    error!(
                        "Could not load enrollments for user {} in the weekly report: {:?}",
                        user.id, e
                    );
                    continue;
                }
            };

            let submissions_this_week: usize = enrollments
                .iter()
                .flat_map(|e| e.submissions.iter())
                .filter(|s| s.submitted_at > week_ago && s.submitted_at <= now)
                .count();

            let body = format!(
                "<html><body>\
                 <p>Hi {},</p>\
                 <p>You handed in <strong>{}</strong> assignment(s) across {} course(s) this week.</p>\
                 <p>Keep it up!</p>\
                 </body></html>",
                user.full_name,
                submissions_this_week,
                enrollments.len(),
            );

            match ctx
                .mailer
                .send(&user.email, "Your Weekly Progress Report", &body)
                .await
            {
                Ok(()) => delivered += 1,
                Err(e) => {
                    error!(
                        "Failed to deliver weekly progress report to {}: {:?}",
                        user.email, e
                    );
                }
            }
        }

        Ok(delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;
    use campus_scheduler_domain::{Course, Enrollment, Submission, User};
    use campus_scheduler_infra::{IMailer, ISys};
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::{Arc, Mutex};

    pub struct StaticTimeSys;
    impl ISys for StaticTimeSys {
        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2021, 2, 21, 8, 30, 0).unwrap()
        }
    }

    struct RecordingMailer {
        sent: Mutex<Vec<(String, String, String)>>,
    }

    #[async_trait::async_trait]
    impl IMailer for RecordingMailer {
        async fn send(&self, to: &str, subject: &str, html_body: &str) -> anyhow::Result<()> {
            self.sent.lock().unwrap().push((
                to.to_string(),
                subject.to_string(),
                html_body.to_string(),
            ));
            Ok(())
        }
    }

    #[actix_web::test]
    async fn reports_trailing_week_submission_count() {
        let mailer = Arc::new(RecordingMailer {
            sent: Mutex::new(Vec::new()),
        });
        let mut ctx = Context::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys);
        ctx.mailer = mailer.clone();

        let course = Course::new("Rust Programming");
        ctx.repos.courses.insert(&course).await.unwrap();
        let user = User::new("ada@campus.test", "Ada Lovelace");
        ctx.repos.users.insert(&user).await.unwrap();

        let mut enrollment = Enrollment::new(user.id.clone(), course.id.clone());
        // One submission inside the window, one long before it
        enrollment.submissions.push(Submission {
            assignment_id: Default::default(),
            submitted_at: Utc.with_ymd_and_hms(2021, 2, 19, 10, 0, 0).unwrap(),
            score: Some(22.0),
        });
        enrollment.submissions.push(Submission {
            assignment_id: Default::default(),
            submitted_at: Utc.with_ymd_and_hms(2021, 1, 2, 10, 0, 0).unwrap(),
            score: Some(19.0),
        });
        ctx.repos.enrollments.insert(&enrollment).await.unwrap();

        let delivered = execute(SendWeeklyProgressUseCase, &ctx).await.unwrap();
        assert_eq!(delivered, 1);

        let sent = mailer.sent.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "ada@campus.test");
        assert_eq!(sent[0].1, "Your Weekly Progress Report");
        assert!(sent[0].2.contains("<strong>1</strong>"));
    }
}
