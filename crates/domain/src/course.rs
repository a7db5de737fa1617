use crate::shared::entity::{Entity, ID};

#[derive(Debug, Clone)]
pub struct Course {
    pub id: ID,
    pub name: String,
    /// Join code students use to enroll
    pub code: String,
    /// The admin `User` that created this course. Deadline emails are
    /// sent from this user's address.
    pub created_by: ID,
}

impl Course {
    pub fn new(name: &str, code: &str, created_by: ID) -> Self {
        Self {
            id: Default::default(),
            name: name.into(),
            code: code.into(),
            created_by,
        }
    }
}

impl Entity for Course {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

/// Enrollment of one student in one course.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseMembership {
    pub course_id: ID,
    pub student_id: ID,
}
