use super::ISentReminderRepo;
use campus_scheduler_domain::ReminderEvent;
use sqlx::PgPool;

pub struct PostgresSentReminderRepo {
    pool: PgPool,
}

impl PostgresSentReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ISentReminderRepo for PostgresSentReminderRepo {
    async fn contains(&self, event: &ReminderEvent) -> anyhow::Result<bool> {
        let sent: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM sent_reminders
                WHERE user_uid = $1 AND assignment_uid = $2 AND lead_time_days = $3
            )
            "#,
        )
        .bind(*event.user_id.inner_ref())
        .bind(*event.assignment_id.inner_ref())
        .bind(event.lead_time_days as i32)
        .fetch_one(&self.pool)
        .await?;
        Ok(sent)
    }

    async fn insert(&self, event: &ReminderEvent) -> anyhow::Result<()> {
        // Concurrent scans may race on the same tuple, the conflict
        // clause keeps the second insert a no-op.
        sqlx::query(
            r#"
            INSERT INTO sent_reminders(user_uid, assignment_uid, lead_time_days)
            VALUES($1, $2, $3)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(*event.user_id.inner_ref())
        .bind(*event.assignment_id.inner_ref())
        .bind(event.lead_time_days as i32)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
