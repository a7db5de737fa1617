use crate::dtos::AssignmentDTO;
use serde::{Deserialize, Serialize};
use volp_domain::{Assignment, ID};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResponse {
    pub assignment: AssignmentDTO,
}

impl AssignmentResponse {
    pub fn new(assignment: Assignment) -> Self {
        Self {
            assignment: AssignmentDTO::new(assignment),
        }
    }
}

pub mod create_assignment {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub course_id: ID,
        pub title: String,
        /// Unix timestamp in millis
        pub deadline: i64,
    }

    pub type APIResponse = AssignmentResponse;
}

pub mod delete_assignment {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub assignment_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
    }
}

pub mod get_course_assignments {
    use super::*;

    #[derive(Serialize, Deserialize)]
    pub struct PathParams {
        pub course_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub assignments: Vec<AssignmentDTO>,
    }

    impl APIResponse {
        pub fn new(assignments: Vec<Assignment>) -> Self {
            Self {
                assignments: assignments.into_iter().map(AssignmentDTO::new).collect(),
            }
        }
    }
}
