use crate::shared::usecase::UseCase;
use futures::StreamExt;
use std::collections::HashMap;
use tracing::{debug, warn};
use volp_domain::{
    Assignment, Course, Notification, Reminder, StageTransition, User, ID,
};
use volp_infra::{Email, VolpContext};

/// The periodic deadline sweep. Evaluates every incomplete reminder
/// against the current time, claims the due stage transitions and
/// dispatches the matching notifications and emails.
///
/// The claim is a conditional stage update and happens before anything
/// is persisted or sent, so two sweeps racing over the same reminder
/// agree on a single winner and a stage is never emailed twice. An email
/// that fails after the claim leaves the notification row unsent; the
/// unsent-notification retry job picks it up later.
#[derive(Debug)]
pub struct SendRemindersUseCase {}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

struct Lookups {
    assignments: HashMap<ID, Assignment>,
    courses: HashMap<ID, Course>,
    users: HashMap<ID, User>,
}

impl Lookups {
    async fn load(due: &[(Reminder, StageTransition)], ctx: &VolpContext) -> anyhow::Result<Self> {
        let mut assignment_ids = due
            .iter()
            .map(|(reminder, _)| reminder.assignment_id.clone())
            .collect::<Vec<_>>();
        assignment_ids.dedup();

        let assignments = ctx
            .repos
            .assignments
            .find_many(&assignment_ids)
            .await?
            .into_iter()
            .map(|a| (a.id.clone(), a))
            .collect::<HashMap<_, _>>();

        let course_ids = assignments
            .values()
            .map(|a| a.course_id.clone())
            .collect::<Vec<_>>();
        let courses = ctx
            .repos
            .courses
            .find_many(&course_ids)
            .await?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect::<HashMap<_, _>>();

        // Students receiving the emails plus the course admins sending them
        let mut user_ids = due
            .iter()
            .map(|(reminder, _)| reminder.student_id.clone())
            .collect::<Vec<_>>();
        user_ids.extend(courses.values().map(|c| c.created_by.clone()));
        let users = ctx
            .repos
            .users
            .find_many(&user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id.clone(), u))
            .collect::<HashMap<_, _>>();

        Ok(Self {
            assignments,
            courses,
            users,
        })
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendRemindersUseCase {
    type Response = ();

    type Error = UseCaseError;

    const NAME: &'static str = "SendReminders";

    async fn execute(&mut self, ctx: &VolpContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();

        let due = ctx
            .repos
            .reminders
            .find_incomplete()
            .await
            .into_iter()
            .filter_map(|reminder| {
                reminder
                    .evaluate(now)
                    .map(|transition| (reminder, transition))
            })
            .collect::<Vec<_>>();

        if due.is_empty() {
            return Ok(());
        }

        let lookups = Lookups::load(&due, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        futures::stream::iter(&due)
            .for_each_concurrent(Some(ctx.config.sweep_concurrency), |(reminder, transition)| {
                dispatch(reminder, *transition, now, ctx, &lookups)
            })
            .await;

        Ok(())
    }
}

/// Handles a single due reminder. Failures are logged and skipped so one
/// bad record never aborts the rest of the sweep.
async fn dispatch(
    reminder: &Reminder,
    transition: StageTransition,
    now: i64,
    ctx: &VolpContext,
    lookups: &Lookups,
) {
    if let StageTransition::Complete = transition {
        // Completions are silent, only the stage moves.
        if let Err(e) = ctx
            .repos
            .reminders
            .update_stage(&reminder.id, reminder.stage, transition.next_stage())
            .await
        {
            warn!("Failed to complete reminder {}: {:?}", reminder.id, e);
        }
        return;
    }

    let assignment = match lookups.assignments.get(&reminder.assignment_id) {
        Some(assignment) => assignment,
        None => {
            warn!(
                "Reminder {} references missing assignment {}",
                reminder.id, reminder.assignment_id
            );
            return;
        }
    };
    let student = match lookups.users.get(&reminder.student_id) {
        Some(student) => student,
        None => {
            warn!(
                "Reminder {} references missing student {}",
                reminder.id, reminder.student_id
            );
            return;
        }
    };
    let admin = lookups
        .courses
        .get(&assignment.course_id)
        .and_then(|course| lookups.users.get(&course.created_by));
    let admin = match admin {
        Some(admin) => admin,
        None => {
            warn!(
                "No course admin found for reminder {}, skipping",
                reminder.id
            );
            return;
        }
    };
    let email_content = match transition.email_content(&assignment.title, reminder.deadline) {
        Some(content) => content,
        None => return,
    };

    // Claim the transition before persisting or sending anything, so two
    // sweeps racing over the same reminder agree on a single winner.
    match ctx
        .repos
        .reminders
        .update_stage(&reminder.id, reminder.stage, transition.next_stage())
        .await
    {
        Ok(true) => (),
        Ok(false) => {
            debug!(
                "Reminder {} was already advanced past {:?} by a concurrent sweep",
                reminder.id, reminder.stage
            );
            return;
        }
        Err(e) => {
            warn!("Failed to update stage for reminder {}: {:?}", reminder.id, e);
            return;
        }
    }

    // Persist the in-app notification before attempting delivery, so a
    // failed email still leaves a retryable record behind.
    let notification = Notification::new(
        reminder.student_id.clone(),
        reminder.assignment_id.clone(),
        email_content.subject.clone(),
        email_content.body.clone(),
        now,
    );
    if let Err(e) = ctx.repos.notifications.insert(&notification).await {
        warn!(
            "Failed to store notification for reminder {}: {:?}",
            reminder.id, e
        );
        return;
    }

    let email = Email {
        from: admin.email.clone(),
        to: student.email.clone(),
        subject: email_content.subject,
        body: email_content.body,
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
                "Failed to email reminder to {} for assignment {}: {:?}",
                student.email, reminder.assignment_id, e
            );
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use std::sync::Arc;
    use volp_domain::{CourseMembership, ReminderStage, UserRole};
    use volp_infra::{InMemoryEmailService, StaticTimeSys};

    const HOUR: i64 = 1000 * 60 * 60;
    const NOW: i64 = 1_600_000_000_000;

    struct TestContext {
        ctx: VolpContext,
        email: Arc<InMemoryEmailService>,
        student: User,
        admin: User,
        assignment: Assignment,
        reminder: Reminder,
    }

    async fn setup(hours_left: i64) -> TestContext {
        let mut ctx = VolpContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys(NOW));
        let email = Arc::new(InMemoryEmailService::new());
        ctx.email = email.clone();

        let admin = User::new("Ada Price", "ada@volp.io", UserRole::Admin);
        let student = User::new("Sam Hale", "sam@volp.io", UserRole::Student);
        ctx.repos.users.insert(&admin).await.unwrap();
        ctx.repos.users.insert(&student).await.unwrap();

        let course = Course::new("Algorithms", "ALG-101", admin.id.clone());
        ctx.repos.courses.insert(&course).await.unwrap();
        ctx.repos
            .memberships
            .insert(&CourseMembership {
                course_id: course.id.clone(),
                student_id: student.id.clone(),
            })
            .await
            .unwrap();

        let assignment = Assignment::new(course.id.clone(), "Lab 1", NOW + hours_left * HOUR);
        ctx.repos.assignments.insert(&assignment).await.unwrap();

        let reminder = Reminder::new(
            student.id.clone(),
            assignment.id.clone(),
            assignment.deadline,
        );
        ctx.repos
            .reminders
            .bulk_insert(&[reminder.clone()])
            .await
            .unwrap();

        TestContext {
            ctx,
            email,
            student,
            admin,
            assignment,
            reminder,
        }
    }

    async fn stage_of(ctx: &VolpContext, reminder: &Reminder) -> ReminderStage {
        ctx.repos.reminders.find(&reminder.id).await.unwrap().stage
    }

    #[actix_web::main]
    #[test]
    async fn sends_24h_notice_inside_the_window() {
        let t = setup(20).await;

        execute(SendRemindersUseCase {}, &t.ctx).await.unwrap();

        let sent = t.email.sent_emails();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].from, t.admin.email);
        assert_eq!(sent[0].to, t.student.email);
        assert_eq!(
            sent[0].subject,
            r#"Reminder: Assignment "Lab 1" due in 24 hours"#
        );
        assert_eq!(stage_of(&t.ctx, &t.reminder).await, ReminderStage::Sent24);

        let notifications = t
            .ctx
            .repos
            .notifications
            .find_by_student(&t.student.id)
            .await
            .unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].message, sent[0].body);
        assert!(notifications[0].sent);
    }

    #[actix_web::main]
    #[test]
    async fn repeated_sweeps_at_the_same_time_send_nothing_new() {
        let t = setup(20).await;

        execute(SendRemindersUseCase {}, &t.ctx).await.unwrap();
        execute(SendRemindersUseCase {}, &t.ctx).await.unwrap();
        execute(SendRemindersUseCase {}, &t.ctx).await.unwrap();

        assert_eq!(t.email.sent_emails().len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn missed_24h_window_is_skipped_not_replayed() {
        let t = setup(6).await;

        execute(SendRemindersUseCase {}, &t.ctx).await.unwrap();

        assert!(t.email.sent_emails().is_empty());
        assert_eq!(stage_of(&t.ctx, &t.reminder).await, ReminderStage::Pending);
    }

    #[actix_web::main]
    #[test]
    async fn past_deadline_completes_silently() {
        let t = setup(-1).await;

        execute(SendRemindersUseCase {}, &t.ctx).await.unwrap();

        assert!(t.email.sent_emails().is_empty());
        assert_eq!(
            stage_of(&t.ctx, &t.reminder).await,
            ReminderStage::Completed
        );
        let notifications = t
            .ctx
            .repos
            .notifications
            .find_by_student(&t.student.id)
            .await
            .unwrap();
        assert!(notifications.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn full_progression_through_both_windows() {
        let mut t = setup(20).await;

        execute(SendRemindersUseCase {}, &t.ctx).await.unwrap();
        assert_eq!(stage_of(&t.ctx, &t.reminder).await, ReminderStage::Sent24);

        t.ctx.sys = Arc::new(StaticTimeSys(t.assignment.deadline - 6 * HOUR));
        execute(SendRemindersUseCase {}, &t.ctx).await.unwrap();
        assert_eq!(stage_of(&t.ctx, &t.reminder).await, ReminderStage::Sent12);

        t.ctx.sys = Arc::new(StaticTimeSys(t.assignment.deadline + 1));
        execute(SendRemindersUseCase {}, &t.ctx).await.unwrap();
        assert_eq!(
            stage_of(&t.ctx, &t.reminder).await,
            ReminderStage::Completed
        );

        let sent = t.email.sent_emails();
        assert_eq!(sent.len(), 2);
        assert_eq!(
            sent[1].subject,
            r#"Reminder: Assignment "Lab 1" due in 12 hours"#
        );
        assert!(sent[1].body.starts_with("Hurry up!"));
    }

    #[actix_web::main]
    #[test]
    async fn failed_email_leaves_an_unsent_notification_and_advances_the_stage() {
        let t = setup(20).await;
        t.email.set_failing(true);

        execute(SendRemindersUseCase {}, &t.ctx).await.unwrap();

        assert!(t.email.sent_emails().is_empty());
        assert_eq!(stage_of(&t.ctx, &t.reminder).await, ReminderStage::Sent24);

        let notifications = t
            .ctx
            .repos
            .notifications
            .find_by_student(&t.student.id)
            .await
            .unwrap();
        assert_eq!(notifications.len(), 1);
        assert!(!notifications[0].sent);
    }

    #[actix_web::main]
    #[test]
    async fn concurrent_sweeps_send_exactly_one_email() {
        let t = setup(20).await;

        let (a, b) = futures::join!(
            execute(SendRemindersUseCase {}, &t.ctx),
            execute(SendRemindersUseCase {}, &t.ctx)
        );
        assert!(a.is_ok());
        assert!(b.is_ok());

        assert_eq!(t.email.sent_emails().len(), 1);
        let notifications = t
            .ctx
            .repos
            .notifications
            .find_by_student(&t.student.id)
            .await
            .unwrap();
        assert_eq!(notifications.len(), 1);
    }

    #[actix_web::main]
    #[test]
    async fn dangling_assignment_reference_is_skipped_without_aborting_the_sweep() {
        let t = setup(20).await;

        // A reminder pointing at an assignment that no longer exists
        let orphan = Reminder::new(t.student.id.clone(), ID::new(), NOW + 20 * HOUR);
        t.ctx
            .repos
            .reminders
            .bulk_insert(&[orphan])
            .await
            .unwrap();

        execute(SendRemindersUseCase {}, &t.ctx).await.unwrap();

        // The healthy reminder still got its email
        assert_eq!(t.email.sent_emails().len(), 1);
    }
}
