mod inmemory;
mod postgres;

pub use inmemory::InMemoryMembershipRepo;
pub use postgres::PostgresMembershipRepo;
use volp_domain::{CourseMembership, ID};

#[async_trait::async_trait]
pub trait IMembershipRepo: Send + Sync {
    async fn insert(&self, membership: &CourseMembership) -> anyhow::Result<()>;
    async fn find_by_course(&self, course_id: &ID) -> Vec<CourseMembership>;
}
