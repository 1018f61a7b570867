use super::ICourseRepo;
use campus_scheduler_domain::{Course, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresCourseRepo {
    pool: PgPool,
}

impl PostgresCourseRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CourseRaw {
    course_uid: Uuid,
    name: String,
}

impl From<CourseRaw> for Course {
    fn from(raw: CourseRaw) -> Self {
        Self {
            id: raw.course_uid.into(),
            name: raw.name,
        }
    }
}

#[async_trait::async_trait]
impl ICourseRepo for PostgresCourseRepo {
    async fn insert(&self, course: &Course) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO courses(course_uid, name)
            VALUES($1, $2)
            "#,
        )
        .bind(*course.id.inner_ref())
        .bind(&course.name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, course_id: &ID) -> Option<Course> {
        sqlx::query_as::<_, CourseRaw>(
            r#"
            SELECT course_uid, name FROM courses
            WHERE course_uid = $1
            "#,
        )
        .bind(*course_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|course| course.into())
    }
}
