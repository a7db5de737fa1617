use crate::assignment::Assignment;
use crate::reminder::format_deadline;
use crate::shared::entity::{Entity, ID};

/// An in-app notification for one student, mirrored to email. The two
/// delivery flags are independent: `sent` tracks email delivery and is
/// flipped by the dispatcher, `is_read` tracks in-app acknowledgment and
/// is flipped by the student. A notification can be read before its
/// email went out, or stay unsent forever if delivery keeps failing.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: ID,
    pub student_id: ID,
    /// The assignment this notification is about. An explicit reference,
    /// so delivery retries never have to guess the assignment from the
    /// message text.
    pub assignment_id: ID,
    pub subject: String,
    pub message: String,
    pub sent: bool,
    pub is_read: bool,
    /// Unix timestamp in millis
    pub created_at: i64,
}

impl Notification {
    pub fn new(
        student_id: ID,
        assignment_id: ID,
        subject: String,
        message: String,
        created_at: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            student_id,
            assignment_id,
            subject,
            message,
            sent: false,
            is_read: false,
            created_at,
        }
    }

    /// Notification announcing a newly created assignment to one
    /// enrolled student.
    pub fn new_assignment_notice(
        student_id: ID,
        assignment: &Assignment,
        course_name: &str,
        created_at: i64,
    ) -> Self {
        let message = format!(
            r#"New assignment "{}" added in {}. Deadline: {}"#,
            assignment.title,
            course_name,
            format_deadline(assignment.deadline)
        );
        let subject = format!("New Assignment in {}", course_name);
        Self::new(
            student_id,
            assignment.id.clone(),
            subject,
            message,
            created_at,
        )
    }
}

impl Entity for Notification {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
