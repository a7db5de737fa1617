use serde::{Deserialize, Serialize};
use volp_domain::{Notification, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDTO {
    pub id: ID,
    pub student_id: ID,
    pub assignment_id: ID,
    pub subject: String,
    pub message: String,
    pub sent: bool,
    pub is_read: bool,
    pub created_at: i64,
}

impl NotificationDTO {
    pub fn new(notification: Notification) -> Self {
        Self {
            id: notification.id.clone(),
            student_id: notification.student_id.clone(),
            assignment_id: notification.assignment_id.clone(),
            subject: notification.subject,
            message: notification.message,
            sent: notification.sent,
            is_read: notification.is_read,
            created_at: notification.created_at,
        }
    }
}
