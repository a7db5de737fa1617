use super::ICourseRepo;
use crate::repos::shared::inmemory_repo::*;
use std::sync::Mutex;
use volp_domain::{Course, ID};

pub struct InMemoryCourseRepo {
    courses: Mutex<Vec<Course>>,
}

impl InMemoryCourseRepo {
    pub fn new() -> Self {
        Self {
            courses: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ICourseRepo for InMemoryCourseRepo {
    async fn insert(&self, course: &Course) -> anyhow::Result<()> {
        insert(course, &self.courses);
        Ok(())
    }

    async fn find(&self, course_id: &ID) -> Option<Course> {
        find(course_id, &self.courses)
    }

    async fn find_many(&self, course_ids: &[ID]) -> anyhow::Result<Vec<Course>> {
        Ok(find_by(&self.courses, |c| course_ids.contains(&c.id)))
    }
}
