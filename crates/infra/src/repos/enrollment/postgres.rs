use super::IEnrollmentRepo;
use campus_scheduler_domain::{Enrollment, Submission, ID};
use chrono::{DateTime, Utc};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresEnrollmentRepo {
    pool: PgPool,
}

impl PostgresEnrollmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// One row of the enrollments left-joined with the user's submissions
/// in that course. Submission columns are NULL for courses without any.
#[derive(Debug, FromRow)]
struct EnrollmentRowRaw {
    course_uid: Uuid,
    assignment_uid: Option<Uuid>,
    submitted_at: Option<DateTime<Utc>>,
    score: Option<f64>,
}

#[async_trait::async_trait]
impl IEnrollmentRepo for PostgresEnrollmentRepo {
    async fn insert(&self, enrollment: &Enrollment) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO enrollments(user_uid, course_uid)
            VALUES($1, $2)
            "#,
        )
        .bind(*enrollment.user_id.inner_ref())
        .bind(*enrollment.course_id.inner_ref())
        .execute(&self.pool)
        .await?;

        for submission in &enrollment.submissions {
            sqlx::query(
                r#"
                INSERT INTO submissions(user_uid, assignment_uid, submitted_at, score)
                VALUES($1, $2, $3, $4)
                "#,
            )
            .bind(*enrollment.user_id.inner_ref())
            .bind(*submission.assignment_id.inner_ref())
            .bind(submission.submitted_at)
            .bind(submission.score)
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    async fn is_enrolled(&self, user_id: &ID, course_id: &ID) -> anyhow::Result<bool> {
        let enrolled: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM enrollments
                WHERE user_uid = $1 AND course_uid = $2
            )
            "#,
        )
        .bind(*user_id.inner_ref())
        .bind(*course_id.inner_ref())
        .fetch_one(&self.pool)
        .await?;
        Ok(enrolled)
    }

    async fn has_submission(&self, user_id: &ID, assignment_id: &ID) -> anyhow::Result<bool> {
        let submitted: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM submissions
                WHERE user_uid = $1 AND assignment_uid = $2
            )
            "#,
        )
        .bind(*user_id.inner_ref())
        .bind(*assignment_id.inner_ref())
        .fetch_one(&self.pool)
        .await?;
        Ok(submitted)
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Enrollment>> {
        let rows = sqlx::query_as::<_, EnrollmentRowRaw>(
            r#"
            SELECT e.course_uid, s.assignment_uid, s.submitted_at, s.score
            FROM enrollments AS e
            LEFT JOIN assignments AS a ON a.course_uid = e.course_uid
            LEFT JOIN submissions AS s
                ON s.assignment_uid = a.assignment_uid AND s.user_uid = e.user_uid
            WHERE e.user_uid = $1
            "#,
        )
        .bind(*user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        let mut enrollments: Vec<Enrollment> = Vec::new();
        for row in rows {
            let course_id: ID = row.course_uid.into();
            let idx = match enrollments.iter().position(|e| e.course_id == course_id) {
                Some(idx) => idx,
                None => {
                    enrollments.push(Enrollment::new(user_id.clone(), course_id));
                    enrollments.len() - 1
                }
            };
            let enrollment = &mut enrollments[idx];
            if let (Some(assignment_uid), Some(submitted_at)) =
                (row.assignment_uid, row.submitted_at)
            {
                let assignment_id: ID = assignment_uid.into();
                if !enrollment.has_submission(&assignment_id) {
                    enrollment.submissions.push(Submission {
                        assignment_id,
                        submitted_at,
                        score: row.score,
                    });
                }
            }
        }
        Ok(enrollments)
    }
}
