mod inmemory;
mod postgres;

pub use inmemory::InMemoryNotificationRepo;
pub use postgres::PostgresNotificationRepo;
use volp_domain::{Notification, ID};

#[async_trait::async_trait]
pub trait INotificationRepo: Send + Sync {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()>;
    async fn find(&self, notification_id: &ID) -> Option<Notification>;
    /// A student's notifications, newest first
    async fn find_by_student(&self, student_id: &ID) -> anyhow::Result<Vec<Notification>>;
    /// All notifications whose email has not gone out yet
    async fn find_unsent(&self) -> Vec<Notification>;
    async fn mark_sent(&self, notification_id: &ID) -> anyhow::Result<()>;
    /// Returns `false` when the notification does not exist
    async fn mark_read(&self, notification_id: &ID) -> anyhow::Result<bool>;
}
