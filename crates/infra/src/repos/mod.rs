mod assignment;
mod course;
mod membership;
mod notification;
mod reminder;
mod shared;
mod submission;
mod user;

use assignment::{InMemoryAssignmentRepo, PostgresAssignmentRepo};
use course::{InMemoryCourseRepo, PostgresCourseRepo};
use membership::{InMemoryMembershipRepo, PostgresMembershipRepo};
use notification::{InMemoryNotificationRepo, PostgresNotificationRepo};
use reminder::{InMemoryReminderRepo, PostgresReminderRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::{Arc, Mutex};
use submission::{InMemorySubmissionRepo, PostgresSubmissionRepo};
use tracing::info;
use user::{InMemoryUserRepo, PostgresUserRepo};

pub use assignment::IAssignmentRepo;
pub use course::ICourseRepo;
pub use membership::IMembershipRepo;
pub use notification::INotificationRepo;
pub use reminder::IReminderRepo;
pub use submission::ISubmissionRepo;
pub use user::IUserRepo;

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
    pub courses: Arc<dyn ICourseRepo>,
    pub memberships: Arc<dyn IMembershipRepo>,
    pub assignments: Arc<dyn IAssignmentRepo>,
    pub submissions: Arc<dyn ISubmissionRepo>,
    pub reminders: Arc<dyn IReminderRepo>,
    pub notifications: Arc<dyn INotificationRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");
        sqlx::migrate!().run(&pool).await?;

        Ok(Self {
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            courses: Arc::new(PostgresCourseRepo::new(pool.clone())),
            memberships: Arc::new(PostgresMembershipRepo::new(pool.clone())),
            assignments: Arc::new(PostgresAssignmentRepo::new(pool.clone())),
            submissions: Arc::new(PostgresSubmissionRepo::new(pool.clone())),
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            notifications: Arc::new(PostgresNotificationRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        // The assignment cascade spans several tables, so the in-memory
        // collections it touches are shared between repos.
        let assignments = Arc::new(Mutex::new(Vec::new()));
        let submissions = Arc::new(Mutex::new(Vec::new()));
        let reminders = Arc::new(Mutex::new(Vec::new()));
        let notifications = Arc::new(Mutex::new(Vec::new()));

        Self {
            users: Arc::new(InMemoryUserRepo::new()),
            courses: Arc::new(InMemoryCourseRepo::new()),
            memberships: Arc::new(InMemoryMembershipRepo::new()),
            assignments: Arc::new(InMemoryAssignmentRepo::new(
                assignments,
                submissions.clone(),
                reminders.clone(),
                notifications.clone(),
            )),
            submissions: Arc::new(InMemorySubmissionRepo::new(submissions)),
            reminders: Arc::new(InMemoryReminderRepo::new(reminders)),
            notifications: Arc::new(InMemoryNotificationRepo::new(notifications)),
        }
    }
}
