use crate::shared::entity::{Entity, ID};

#[derive(Debug, Clone)]
pub struct Assignment {
    pub id: ID,
    pub course_id: ID,
    pub title: String,
    /// Deadline as a unix timestamp in millis
    pub deadline: i64,
}

impl Assignment {
    pub fn new(course_id: ID, title: &str, deadline: i64) -> Self {
        Self {
            id: Default::default(),
            course_id,
            title: title.into(),
            deadline,
        }
    }
}

impl Entity for Assignment {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
