use super::IUserRepo;
use campus_scheduler_domain::{default_lead_times, ReminderPreference, User, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_uid: Uuid,
    email: String,
    full_name: String,
    reminders_enabled: bool,
    /// NULL for accounts created before lead times were configurable;
    /// decodes to the default set.
    reminder_lead_times: Option<Vec<i32>>,
}

impl From<UserRaw> for User {
    fn from(raw: UserRaw) -> Self {
        let lead_times = match raw.reminder_lead_times {
            Some(lead_times) => lead_times
                .into_iter()
                .filter(|days| *days > 0)
                .map(|days| days as u32)
                .collect(),
            None => default_lead_times(),
        };
        Self {
            id: raw.user_uid.into(),
            email: raw.email,
            full_name: raw.full_name,
            reminder_preference: ReminderPreference {
                enabled: raw.reminders_enabled,
                lead_times,
            },
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        let lead_times: Vec<i32> = user
            .reminder_preference
            .lead_times
            .iter()
            .map(|days| *days as i32)
            .collect();
        sqlx::query(
            r#"
            INSERT INTO users
            (user_uid, email, full_name, reminders_enabled, reminder_lead_times)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(*user.id.inner_ref())
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(user.reminder_preference.enabled)
        .bind(lead_times)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT user_uid, email, full_name, reminders_enabled, reminder_lead_times
            FROM users
            WHERE user_uid = $1
            "#,
        )
        .bind(*user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|user| user.into())
    }

    async fn find_reminder_enabled(&self) -> anyhow::Result<Vec<User>> {
        let users = sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT user_uid, email, full_name, reminders_enabled, reminder_lead_times
            FROM users
            WHERE reminders_enabled = TRUE
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users.into_iter().map(|user| user.into()).collect())
    }
}
