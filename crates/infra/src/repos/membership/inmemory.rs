use super::IMembershipRepo;
use crate::repos::shared::inmemory_repo::*;
use std::sync::Mutex;
use volp_domain::{CourseMembership, ID};

pub struct InMemoryMembershipRepo {
    memberships: Mutex<Vec<CourseMembership>>,
}

impl InMemoryMembershipRepo {
    pub fn new() -> Self {
        Self {
            memberships: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IMembershipRepo for InMemoryMembershipRepo {
    async fn insert(&self, membership: &CourseMembership) -> anyhow::Result<()> {
        insert(membership, &self.memberships);
        Ok(())
    }

    async fn find_by_course(&self, course_id: &ID) -> Vec<CourseMembership> {
        find_by(&self.memberships, |m| m.course_id == *course_id)
    }
}
