use super::INotificationRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use volp_domain::{Notification, ID};

pub struct PostgresNotificationRepo {
    pool: PgPool,
}

impl PostgresNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRaw {
    notification_uid: Uuid,
    student_uid: Uuid,
    assignment_uid: Uuid,
    subject: String,
    message: String,
    sent: bool,
    is_read: bool,
    created_at: i64,
}

impl From<NotificationRaw> for Notification {
    fn from(raw: NotificationRaw) -> Self {
        Notification {
            id: raw.notification_uid.into(),
            student_id: raw.student_uid.into(),
            assignment_id: raw.assignment_uid.into(),
            subject: raw.subject,
            message: raw.message,
            sent: raw.sent,
            is_read: raw.is_read,
            created_at: raw.created_at,
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for PostgresNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications(notification_uid, student_uid, assignment_uid, subject, message, sent, is_read, created_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(notification.id.inner_ref())
        .bind(notification.student_id.inner_ref())
        .bind(notification.assignment_id.inner_ref())
        .bind(&notification.subject)
        .bind(&notification.message)
        .bind(notification.sent)
        .bind(notification.is_read)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, notification_id: &ID) -> Option<Notification> {
        let notification: Option<NotificationRaw> = sqlx::query_as(
            r#"
            SELECT * FROM notifications AS n
            WHERE n.notification_uid = $1
            "#,
        )
        .bind(notification_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten();
        notification.map(|n| n.into())
    }

    async fn find_by_student(&self, student_id: &ID) -> anyhow::Result<Vec<Notification>> {
        let notifications: Vec<NotificationRaw> = sqlx::query_as(
            r#"
            SELECT * FROM notifications AS n
            WHERE n.student_uid = $1
            ORDER BY n.created_at DESC
            "#,
        )
        .bind(student_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        Ok(notifications.into_iter().map(|n| n.into()).collect())
    }

    async fn find_unsent(&self) -> Vec<Notification> {
        let notifications: Vec<NotificationRaw> = match sqlx::query_as(
            r#"
            SELECT * FROM notifications AS n
            WHERE n.sent = FALSE
            "#,
        )
        .fetch_all(&self.pool)
        .await
        {
            Ok(notifications) => notifications,
            Err(_) => Vec::new(),
        };
        notifications.into_iter().map(|n| n.into()).collect()
    }

    async fn mark_sent(&self, notification_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE notifications
            SET sent = TRUE
            WHERE notification_uid = $1
            "#,
        )
        .bind(notification_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn mark_read(&self, notification_id: &ID) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE notification_uid = $1
            "#,
        )
        .bind(notification_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }
}
