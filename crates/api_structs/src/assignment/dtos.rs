use serde::{Deserialize, Serialize};
use volp_domain::{Assignment, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDTO {
    pub id: ID,
    pub course_id: ID,
    pub title: String,
    pub deadline: i64,
}

impl AssignmentDTO {
    pub fn new(assignment: Assignment) -> Self {
        Self {
            id: assignment.id.clone(),
            course_id: assignment.course_id.clone(),
            title: assignment.title,
            deadline: assignment.deadline,
        }
    }
}
