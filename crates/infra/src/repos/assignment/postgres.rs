use super::IAssignmentRepo;
use campus_scheduler_domain::{Assignment, AssignmentWithCourse, Course};
use chrono::{DateTime, Utc};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;

pub struct PostgresAssignmentRepo {
    pool: PgPool,
}

impl PostgresAssignmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AssignmentWithCourseRaw {
    assignment_uid: Uuid,
    course_uid: Uuid,
    title: String,
    kind: String,
    max_score: f64,
    due_at: DateTime<Utc>,
    active: bool,
    course_name: String,
}

impl TryFrom<AssignmentWithCourseRaw> for AssignmentWithCourse {
    type Error = anyhow::Error;

    fn try_from(raw: AssignmentWithCourseRaw) -> Result<Self, Self::Error> {
        Ok(Self {
            assignment: Assignment {
                id: raw.assignment_uid.into(),
                course_id: raw.course_uid.into(),
                title: raw.title,
                kind: raw.kind.parse()?,
                max_score: raw.max_score,
                due_at: raw.due_at,
                active: raw.active,
            },
            course: Course {
                id: raw.course_uid.into(),
                name: raw.course_name,
            },
        })
    }
}

#[async_trait::async_trait]
impl IAssignmentRepo for PostgresAssignmentRepo {
    async fn insert(&self, assignment: &Assignment) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO assignments
            (assignment_uid, course_uid, title, kind, max_score, due_at, active)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(*assignment.id.inner_ref())
        .bind(*assignment.course_id.inner_ref())
        .bind(&assignment.title)
        .bind(assignment.kind.as_str())
        .bind(assignment.max_score)
        .bind(assignment.due_at)
        .bind(assignment.active)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_active_due_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> anyhow::Result<Vec<AssignmentWithCourse>> {
        let rows = sqlx::query_as::<_, AssignmentWithCourseRaw>(
            r#"
            SELECT a.assignment_uid, a.course_uid, a.title, a.kind,
                   a.max_score, a.due_at, a.active, c.name AS course_name
            FROM assignments AS a
            INNER JOIN courses AS c ON c.course_uid = a.course_uid
            WHERE a.active = TRUE AND a.due_at >= $1 AND a.due_at < $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(AssignmentWithCourse::try_from).collect()
    }
}
