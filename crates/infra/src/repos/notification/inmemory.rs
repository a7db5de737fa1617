use super::INotificationRepo;
use crate::repos::shared::inmemory_repo::*;
use std::sync::{Arc, Mutex};
use volp_domain::{Notification, ID};

pub struct InMemoryNotificationRepo {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl InMemoryNotificationRepo {
    pub fn new(notifications: Arc<Mutex<Vec<Notification>>>) -> Self {
        Self { notifications }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for InMemoryNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        insert(notification, &self.notifications);
        Ok(())
    }

    async fn find(&self, notification_id: &ID) -> Option<Notification> {
        find(notification_id, &self.notifications)
    }

    async fn find_by_student(&self, student_id: &ID) -> anyhow::Result<Vec<Notification>> {
        let mut notifications = find_by(&self.notifications, |n| n.student_id == *student_id);
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    async fn find_unsent(&self) -> Vec<Notification> {
        find_by(&self.notifications, |n| !n.sent)
    }

    async fn mark_sent(&self, notification_id: &ID) -> anyhow::Result<()> {
        update_by(
            &self.notifications,
            |n| n.id == *notification_id,
            |n| n.sent = true,
        );
        Ok(())
    }

    async fn mark_read(&self, notification_id: &ID) -> anyhow::Result<bool> {
        let updated = update_by(
            &self.notifications,
            |n| n.id == *notification_id,
            |n| n.is_read = true,
        );
        Ok(updated > 0)
    }
}
