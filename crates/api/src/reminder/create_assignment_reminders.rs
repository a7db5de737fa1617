use crate::shared::usecase::UseCase;
use volp_domain::{Assignment, Reminder};
use volp_infra::VolpContext;

/// Creates one `Reminder` per enrolled student when an assignment is
/// created. Students enrolling after that point do not get one, which
/// mirrors the notification fan-out at creation time.
#[derive(Debug)]
pub struct CreateAssignmentRemindersUseCase {
    pub assignment: Assignment,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateAssignmentRemindersUseCase {
    type Response = ();

    type Error = UseCaseError;

    const NAME: &'static str = "CreateAssignmentReminders";

    async fn execute(&mut self, ctx: &VolpContext) -> Result<Self::Response, Self::Error> {
        let memberships = ctx
            .repos
            .memberships
            .find_by_course(&self.assignment.course_id)
            .await;

        let reminders = memberships
            .into_iter()
            .map(|membership| {
                Reminder::new(
                    membership.student_id,
                    self.assignment.id.clone(),
                    self.assignment.deadline,
                )
            })
            .collect::<Vec<_>>();

        if reminders.is_empty() {
            return Ok(());
        }

        ctx.repos
            .reminders
            .bulk_insert(&reminders)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use volp_domain::{Course, CourseMembership, ReminderStage, User, UserRole};

    #[actix_web::main]
    #[test]
    async fn creates_one_pending_reminder_per_enrolled_student() {
        let ctx = VolpContext::create_inmemory();
        let admin = User::new("Ada Price", "ada@volp.io", UserRole::Admin);
        ctx.repos.users.insert(&admin).await.unwrap();
        let course = Course::new("Algorithms", "ALG-101", admin.id.clone());
        ctx.repos.courses.insert(&course).await.unwrap();

        for i in 0..2 {
            let student = User::new(
                &format!("Student {}", i),
                &format!("student{}@volp.io", i),
                UserRole::Student,
            );
            ctx.repos.users.insert(&student).await.unwrap();
            ctx.repos
                .memberships
                .insert(&CourseMembership {
                    course_id: course.id.clone(),
                    student_id: student.id.clone(),
                })
                .await
                .unwrap();
        }

        let assignment = Assignment::new(course.id.clone(), "Lab 1", 2_000_000_000_000);
        ctx.repos.assignments.insert(&assignment).await.unwrap();

        let mut usecase = CreateAssignmentRemindersUseCase {
            assignment: assignment.clone(),
        };
        assert!(usecase.execute(&ctx).await.is_ok());

        let reminders = ctx.repos.reminders.find_incomplete().await;
        assert_eq!(reminders.len(), 2);
        for reminder in reminders {
            assert_eq!(reminder.assignment_id, assignment.id);
            assert_eq!(reminder.deadline, assignment.deadline);
            assert_eq!(reminder.stage, ReminderStage::Pending);
        }
    }

    #[actix_web::main]
    #[test]
    async fn course_without_students_creates_nothing() {
        let ctx = VolpContext::create_inmemory();
        let admin = User::new("Ada Price", "ada@volp.io", UserRole::Admin);
        ctx.repos.users.insert(&admin).await.unwrap();
        let course = Course::new("Algorithms", "ALG-101", admin.id.clone());
        ctx.repos.courses.insert(&course).await.unwrap();

        let assignment = Assignment::new(course.id.clone(), "Lab 1", 2_000_000_000_000);
        let mut usecase = CreateAssignmentRemindersUseCase { assignment };

        assert!(usecase.execute(&ctx).await.is_ok());
        assert!(ctx.repos.reminders.find_incomplete().await.is_empty());
    }
}
