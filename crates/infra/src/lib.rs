mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, SmtpConfig};
pub use repos::Repos;
pub use repos::{
    IAssignmentRepo, ICourseRepo, IMembershipRepo, INotificationRepo, IReminderRepo,
    ISubmissionRepo, IUserRepo,
};
pub use services::{Email, IEmailService, InMemoryEmailService, SmtpEmailService};
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};

/// Shared application context: repositories, configuration, clock and
/// email transport. All collaborators are injected here so that use
/// cases and jobs never reach for process-wide singletons.
#[derive(Clone)]
pub struct VolpContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub email: Arc<dyn IEmailService>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl VolpContext {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        let email = Arc::new(
            SmtpEmailService::new(&config.smtp).expect("SMTP configuration must be valid"),
        );
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            email,
        }
    }

    /// Context backed by in-memory storage and a recording email double.
    /// Used by tests; no Postgres or SMTP required.
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            email: Arc::new(InMemoryEmailService::new()),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> VolpContext {
    VolpContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}
