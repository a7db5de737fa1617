mod inmemory;
mod postgres;

pub use inmemory::InMemoryAssignmentRepo;
pub use postgres::PostgresAssignmentRepo;
use volp_domain::{Assignment, ID};

#[async_trait::async_trait]
pub trait IAssignmentRepo: Send + Sync {
    async fn insert(&self, assignment: &Assignment) -> anyhow::Result<()>;
    async fn find(&self, assignment_id: &ID) -> Option<Assignment>;
    async fn find_many(&self, assignment_ids: &[ID]) -> anyhow::Result<Vec<Assignment>>;
    async fn find_by_course(&self, course_id: &ID) -> Vec<Assignment>;
    /// Delete the assignment together with its reminders, submissions
    /// and notifications as one atomic unit. Returns `false` when the
    /// assignment does not exist; partial deletes are rolled back.
    async fn delete_cascade(&self, assignment_id: &ID) -> anyhow::Result<bool>;
}

#[cfg(test)]
mod test {
    use crate::VolpContext;
    use volp_domain::{Assignment, Notification, Reminder, Submission, ID};

    #[tokio::test]
    async fn cascade_delete_removes_dependents() {
        let ctx = VolpContext::create_inmemory();

        let student_id = ID::new();
        let assignment = Assignment::new(ID::new(), "Lab 1", 10_000);
        let other = Assignment::new(ID::new(), "Lab 2", 10_000);
        ctx.repos.assignments.insert(&assignment).await.unwrap();
        ctx.repos.assignments.insert(&other).await.unwrap();

        let reminder = Reminder::new(student_id.clone(), assignment.id.clone(), 10_000);
        let kept_reminder = Reminder::new(student_id.clone(), other.id.clone(), 10_000);
        ctx.repos
            .reminders
            .bulk_insert(&[reminder, kept_reminder.clone()])
            .await
            .unwrap();
        ctx.repos
            .submissions
            .insert(&Submission::new(
                student_id.clone(),
                assignment.id.clone(),
                "uploads/1.pdf",
                5_000,
            ))
            .await
            .unwrap();
        ctx.repos
            .notifications
            .insert(&Notification::new(
                student_id.clone(),
                assignment.id.clone(),
                "subject".into(),
                "message".into(),
                5_000,
            ))
            .await
            .unwrap();

        let deleted = ctx
            .repos
            .assignments
            .delete_cascade(&assignment.id)
            .await
            .expect("To delete assignment");
        assert!(deleted);

        assert!(ctx.repos.assignments.find(&assignment.id).await.is_none());
        assert!(ctx
            .repos
            .submissions
            .find_by_assignment(&assignment.id)
            .await
            .is_empty());
        assert_eq!(ctx.repos.reminders.find_incomplete().await, vec![kept_reminder]);
        assert!(ctx
            .repos
            .notifications
            .find_by_student(&student_id)
            .await
            .unwrap()
            .is_empty());

        // Unknown assignment reports not-found
        let deleted = ctx
            .repos
            .assignments
            .delete_cascade(&assignment.id)
            .await
            .unwrap();
        assert!(!deleted);
    }
}
