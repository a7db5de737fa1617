use super::IAssignmentRepo;
use crate::repos::shared::inmemory_repo::*;
use std::sync::{Arc, Mutex};
use volp_domain::{Assignment, Notification, Reminder, Submission, ID};

pub struct InMemoryAssignmentRepo {
    assignments: Arc<Mutex<Vec<Assignment>>>,
    // Shared with the other in-memory repos so the cascade can reach them
    submissions: Arc<Mutex<Vec<Submission>>>,
    reminders: Arc<Mutex<Vec<Reminder>>>,
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl InMemoryAssignmentRepo {
    pub fn new(
        assignments: Arc<Mutex<Vec<Assignment>>>,
        submissions: Arc<Mutex<Vec<Submission>>>,
        reminders: Arc<Mutex<Vec<Reminder>>>,
        notifications: Arc<Mutex<Vec<Notification>>>,
    ) -> Self {
        Self {
            assignments,
            submissions,
            reminders,
            notifications,
        }
    }
}

#[async_trait::async_trait]
impl IAssignmentRepo for InMemoryAssignmentRepo {
    async fn insert(&self, assignment: &Assignment) -> anyhow::Result<()> {
        insert(assignment, &self.assignments);
        Ok(())
    }

    async fn find(&self, assignment_id: &ID) -> Option<Assignment> {
        find(assignment_id, &self.assignments)
    }

    async fn find_many(&self, assignment_ids: &[ID]) -> anyhow::Result<Vec<Assignment>> {
        Ok(find_by(&self.assignments, |a| {
            assignment_ids.contains(&a.id)
        }))
    }

    async fn find_by_course(&self, course_id: &ID) -> Vec<Assignment> {
        find_by(&self.assignments, |a| a.course_id == *course_id)
    }

    async fn delete_cascade(&self, assignment_id: &ID) -> anyhow::Result<bool> {
        let existed = delete_by(&self.assignments, |a| a.id == *assignment_id).deleted_count > 0;
        if !existed {
            return Ok(false);
        }
        delete_by(&self.reminders, |r| r.assignment_id == *assignment_id);
        delete_by(&self.submissions, |s| s.assignment_id == *assignment_id);
        delete_by(&self.notifications, |n| n.assignment_id == *assignment_id);
        Ok(true)
    }
}
