use super::create_assignment::CreateAssignmentUseCase;
use crate::notification::notify_new_assignment::NotifyCourseOfNewAssignmentUseCase;
use crate::reminder::create_assignment_reminders::CreateAssignmentRemindersUseCase;
use crate::shared::usecase::{execute, Subscriber};
use volp_domain::Assignment;

pub struct CreateRemindersOnNewAssignment;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateAssignmentUseCase> for CreateRemindersOnNewAssignment {
    async fn notify(&self, assignment: &Assignment, ctx: &volp_infra::VolpContext) {
        let create_reminders = CreateAssignmentRemindersUseCase {
            assignment: assignment.clone(),
        };

        // Sideeffect, ignore result
        let _ = execute(create_reminders, ctx).await;
    }
}

pub struct NotifyStudentsOnNewAssignment;

#[async_trait::async_trait(?Send)]
impl Subscriber<CreateAssignmentUseCase> for NotifyStudentsOnNewAssignment {
    async fn notify(&self, assignment: &Assignment, ctx: &volp_infra::VolpContext) {
        let notify_course = NotifyCourseOfNewAssignmentUseCase {
            assignment: assignment.clone(),
        };

        // Sideeffect, ignore result
        let _ = execute(notify_course, ctx).await;
    }
}
