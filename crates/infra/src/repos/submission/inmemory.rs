use super::ISubmissionRepo;
use crate::repos::shared::inmemory_repo::*;
use std::sync::{Arc, Mutex};
use volp_domain::{Submission, ID};

pub struct InMemorySubmissionRepo {
    submissions: Arc<Mutex<Vec<Submission>>>,
}

impl InMemorySubmissionRepo {
    pub fn new(submissions: Arc<Mutex<Vec<Submission>>>) -> Self {
        Self { submissions }
    }
}

#[async_trait::async_trait]
impl ISubmissionRepo for InMemorySubmissionRepo {
    async fn insert(&self, submission: &Submission) -> anyhow::Result<()> {
        insert(submission, &self.submissions);
        Ok(())
    }

    async fn find_by_assignment(&self, assignment_id: &ID) -> Vec<Submission> {
        find_by(&self.submissions, |s| s.assignment_id == *assignment_id)
    }
}
