use crate::shared::usecase::UseCase;
use std::collections::HashMap;
use tracing::warn;
use volp_domain::ID;
use volp_infra::{Email, VolpContext};

/// Delivery retry for notifications whose row exists but whose email
/// never went out. Rebuilds the sender and recipient from the stored
/// assignment reference and resends the stored subject and message
/// verbatim.
#[derive(Debug)]
pub struct SendUnsentNotificationsUseCase {}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendUnsentNotificationsUseCase {
    type Response = ();

    type Error = UseCaseError;

    const NAME: &'static str = "SendUnsentNotifications";

    async fn execute(&mut self, ctx: &VolpContext) -> Result<Self::Response, Self::Error> {
        let unsent = ctx.repos.notifications.find_unsent().await;
        if unsent.is_empty() {
            return Ok(());
        }

        let assignment_ids = unsent
            .iter()
            .map(|n| n.assignment_id.clone())
            .collect::<Vec<_>>();
        let assignments = ctx
            .repos
            .assignments
            .find_many(&assignment_ids)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .into_iter()
            .map(|a| (a.id.clone(), a))
            .collect::<HashMap<ID, _>>();

        let course_ids = assignments
            .values()
            .map(|a| a.course_id.clone())
            .collect::<Vec<_>>();
        let courses = ctx
            .repos
            .courses
            .find_many(&course_ids)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect::<HashMap<ID, _>>();

        let mut user_ids = unsent
            .iter()
            .map(|n| n.student_id.clone())
            .collect::<Vec<_>>();
        user_ids.extend(courses.values().map(|c| c.created_by.clone()));
        let users = ctx
            .repos
            .users
            .find_many(&user_ids)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect::<HashMap<ID, _>>();

        for notification in unsent {
            let admin = assignments
                .get(&notification.assignment_id)
                .and_then(|assignment| courses.get(&assignment.course_id))
                .and_then(|course| users.get(&course.created_by));
            let student = users.get(&notification.student_id);
            let (admin, student) = match (admin, student) {
                (Some(admin), Some(student)) => (admin, student),
                _ => {
                    warn!(
                        "Notification {} has a dangling reference, skipping delivery retry",
                        notification.id
                    );
                    continue;
                }
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
                        "Delivery retry for notification {} failed again: {:?}",
                        notification.id, e
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
    use volp_domain::{Assignment, Course, Notification, User, UserRole};
    use volp_infra::InMemoryEmailService;

    struct TestContext {
        ctx: VolpContext,
        email: Arc<InMemoryEmailService>,
        student: User,
        notification: Notification,
    }

    async fn setup() -> TestContext {
        let mut ctx = VolpContext::create_inmemory();
        let email = Arc::new(InMemoryEmailService::new());
        ctx.email = email.clone();

        let admin = User::new("Ada Price", "ada@volp.io", UserRole::Admin);
        let student = User::new("Sam Hale", "sam@volp.io", UserRole::Student);
        ctx.repos.users.insert(&admin).await.unwrap();
        ctx.repos.users.insert(&student).await.unwrap();
        let course = Course::new("Algorithms", "ALG-101", admin.id.clone());
        ctx.repos.courses.insert(&course).await.unwrap();
        let assignment = Assignment::new(course.id.clone(), "Lab 1", 2_000_000_000_000);
        ctx.repos.assignments.insert(&assignment).await.unwrap();

        let notification = Notification::new(
            student.id.clone(),
            assignment.id.clone(),
            "Subject".into(),
            "Message".into(),
            1_000,
        );
        ctx.repos.notifications.insert(&notification).await.unwrap();

        TestContext {
            ctx,
            email,
            student,
            notification,
        }
    }

    #[actix_web::main]
    #[test]
    async fn resends_the_stored_notification_and_marks_it_sent() {
        let t = setup().await;

        let mut usecase = SendUnsentNotificationsUseCase {};
        assert!(usecase.execute(&t.ctx).await.is_ok());

        let sent = t.email.sent_emails();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, t.student.email);
        assert_eq!(sent[0].subject, "Subject");
        assert_eq!(sent[0].body, "Message");

        let stored = t
            .ctx
            .repos
            .notifications
            .find(&t.notification.id)
            .await
            .unwrap();
        assert!(stored.sent);
    }

    #[actix_web::main]
    #[test]
    async fn failed_retry_leaves_the_notification_unsent() {
        let t = setup().await;
        t.email.set_failing(true);

        let mut usecase = SendUnsentNotificationsUseCase {};
        assert!(usecase.execute(&t.ctx).await.is_ok());

        let stored = t
            .ctx
            .repos
            .notifications
            .find(&t.notification.id)
            .await
            .unwrap();
        assert!(!stored.sent);

        // Once the transport recovers the next run delivers it
        t.email.set_failing(false);
        let mut usecase = SendUnsentNotificationsUseCase {};
        assert!(usecase.execute(&t.ctx).await.is_ok());
        assert!(t
            .ctx
            .repos
            .notifications
            .find(&t.notification.id)
            .await
            .unwrap()
            .sent);
    }

    #[actix_web::main]
    #[test]
    async fn already_sent_notifications_are_not_resent() {
        let t = setup().await;
        t.ctx
            .repos
            .notifications
            .mark_sent(&t.notification.id)
            .await
            .unwrap();

        let mut usecase = SendUnsentNotificationsUseCase {};
        assert!(usecase.execute(&t.ctx).await.is_ok());

        assert!(t.email.sent_emails().is_empty());
    }
}
