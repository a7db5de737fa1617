use super::IReminderRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use volp_domain::{Reminder, ReminderStage, ID};

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    student_uid: Uuid,
    assignment_uid: Uuid,
    deadline: i64,
    stage: String,
}

impl From<ReminderRaw> for Reminder {
    fn from(raw: ReminderRaw) -> Self {
        Reminder {
            id: raw.reminder_uid.into(),
            student_id: raw.student_uid.into(),
            assignment_id: raw.assignment_uid.into(),
            deadline: raw.deadline,
            stage: raw.stage.parse().unwrap_or(ReminderStage::Completed),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn bulk_insert(&self, reminders: &[Reminder]) -> anyhow::Result<()> {
        for reminder in reminders {
            sqlx::query(
                r#"
                INSERT INTO reminders(reminder_uid, student_uid, assignment_uid, deadline, stage)
                VALUES($1, $2, $3, $4, $5)
                "#,
            )
            .bind(reminder.id.inner_ref())
            .bind(reminder.student_id.inner_ref())
            .bind(reminder.assignment_id.inner_ref())
            .bind(reminder.deadline)
            .bind(reminder.stage.as_str())
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        let reminder: Option<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten();
        reminder.map(|r| r.into())
    }

    async fn find_incomplete(&self) -> Vec<Reminder> {
        let reminders: Vec<ReminderRaw> = match sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.stage != 'completed'
            "#,
        )
        .fetch_all(&self.pool)
        .await
        {
            Ok(reminders) => reminders,
            Err(_) => Vec::new(),
        };
        reminders.into_iter().map(|r| r.into()).collect()
    }

    async fn update_stage(
        &self,
        reminder_id: &ID,
        expected: ReminderStage,
        new_stage: ReminderStage,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE reminders
            SET stage = $1
            WHERE reminder_uid = $2 AND stage = $3
            "#,
        )
        .bind(new_stage.as_str())
        .bind(reminder_id.inner_ref())
        .bind(expected.as_str())
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() > 0)
    }
}
