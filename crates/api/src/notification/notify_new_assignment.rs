use crate::shared::usecase::UseCase;
use tracing::warn;
use volp_domain::{Assignment, Notification};
use volp_infra::{Email, VolpContext};

/// Announces a freshly created assignment to every enrolled student:
/// one stored notification per student, mirrored to email on a
/// best-effort basis. Email failures leave the notification unsent for
/// the retry job, they never fail the fan-out.
#[derive(Debug)]
pub struct NotifyCourseOfNewAssignmentUseCase {
    pub assignment: Assignment,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    CourseNotFound,
}

#[async_trait::async_trait(?Send)]
impl UseCase for NotifyCourseOfNewAssignmentUseCase {
    type Response = ();

    type Error = UseCaseError;

    const NAME: &'static str = "NotifyCourseOfNewAssignment";

    async fn execute(&mut self, ctx: &VolpContext) -> Result<Self::Response, Self::Error> {
        let course = ctx
            .repos
            .courses
            .find(&self.assignment.course_id)
            .await
            .ok_or(UseCaseError::CourseNotFound)?;
        let admin = ctx.repos.users.find(&course.created_by).await;
        let memberships = ctx.repos.memberships.find_by_course(&course.id).await;
        let now = ctx.sys.get_timestamp_millis();

        for membership in memberships {
            let student = match ctx.repos.users.find(&membership.student_id).await {
                Some(student) => student,
                None => {
                    warn!(
                        "Membership references missing student {}, skipping",
                        membership.student_id
                    );
                    continue;
                }
            };

            let notification = Notification::new_assignment_notice(
                student.id.clone(),
                &self.assignment,
                &course.name,
                now,
            );
            if let Err(e) = ctx.repos.notifications.insert(&notification).await {
                warn!(
                    "Failed to store new-assignment notification for {}: {:?}",
                    student.id, e
                );
                continue;
            }

            let admin = match &admin {
                Some(admin) => admin,
                None => continue,
            };
            let email = Email {
                from: admin.email.clone(),
                to: student.email.clone(),
                subject: notification.subject.clone(),
                body: notification.message.clone(),
            };
            match ctx.email.send(email).await {
                Ok(()) => {
                    if let Err(e) = ctx.repos.notifications.mark_sent(&notification.id).await {
                        warn!(
                            "Failed to mark notification {} as sent: {:?}",
                            notification.id, e
                        );
                    }
                }
                Err(e) => {
                    warn!(
                        "Failed to email new-assignment notice to {}: {:?}",
                        student.email, e
                    );
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::Arc;
    use volp_domain::{Course, CourseMembership, User, UserRole};
    use volp_infra::InMemoryEmailService;

    struct TestContext {
        ctx: VolpContext,
        email: Arc<InMemoryEmailService>,
        assignment: Assignment,
        students: Vec<User>,
    }

    async fn setup(student_count: usize) -> TestContext {
        let mut ctx = VolpContext::create_inmemory();
        let email = Arc::new(InMemoryEmailService::new());
        ctx.email = email.clone();

        let admin = User::new("Ada Price", "ada@volp.io", UserRole::Admin);
        ctx.repos.users.insert(&admin).await.unwrap();
        let course = Course::new("Algorithms", "ALG-101", admin.id.clone());
        ctx.repos.courses.insert(&course).await.unwrap();

        let mut students = Vec::new();
        for i in 0..student_count {
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
            students.push(student);
        }

        let assignment = Assignment::new(course.id.clone(), "Lab 1", 2_000_000_000_000);
        ctx.repos.assignments.insert(&assignment).await.unwrap();

        TestContext {
            ctx,
            email,
            assignment,
            students,
        }
    }

    #[actix_web::main]
    #[test]
    async fn notifies_every_enrolled_student() {
        let t = setup(3).await;

        let mut usecase = NotifyCourseOfNewAssignmentUseCase {
            assignment: t.assignment.clone(),
        };
        assert!(usecase.execute(&t.ctx).await.is_ok());

        assert_eq!(t.email.sent_emails().len(), 3);
        for student in &t.students {
            let notifications = t
                .ctx
                .repos
                .notifications
                .find_by_student(&student.id)
                .await
                .unwrap();
            assert_eq!(notifications.len(), 1);
            assert!(notifications[0].sent);
            assert_eq!(notifications[0].subject, "New Assignment in Algorithms");
            assert!(notifications[0]
                .message
                .starts_with(r#"New assignment "Lab 1" added in Algorithms."#));
        }
    }

    #[actix_web::main]
    #[test]
    async fn email_failure_still_stores_the_notifications() {
        let t = setup(2).await;
        t.email.set_failing(true);

        let mut usecase = NotifyCourseOfNewAssignmentUseCase {
            assignment: t.assignment.clone(),
        };
        assert!(usecase.execute(&t.ctx).await.is_ok());

        assert!(t.email.sent_emails().is_empty());
        for student in &t.students {
            let notifications = t
                .ctx
                .repos
                .notifications
                .find_by_student(&student.id)
                .await
                .unwrap();
            assert_eq!(notifications.len(), 1);
            assert!(!notifications[0].sent);
        }
    }
}
