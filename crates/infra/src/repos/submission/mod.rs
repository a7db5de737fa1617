mod inmemory;
mod postgres;

pub use inmemory::InMemorySubmissionRepo;
pub use postgres::PostgresSubmissionRepo;
use volp_domain::{Submission, ID};

#[async_trait::async_trait]
pub trait ISubmissionRepo: Send + Sync {
    async fn insert(&self, submission: &Submission) -> anyhow::Result<()>;
    async fn find_by_assignment(&self, assignment_id: &ID) -> Vec<Submission>;
}
