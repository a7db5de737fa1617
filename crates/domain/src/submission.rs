use crate::shared::entity::{Entity, ID};

#[derive(Debug, Clone)]
pub struct Submission {
    pub id: ID,
    pub student_id: ID,
    pub assignment_id: ID,
    /// Where the uploaded file was stored. Upload handling itself lives
    /// outside this crate.
    pub file_path: String,
    /// Unix timestamp in millis
    pub submitted_at: i64,
}

impl Submission {
    pub fn new(student_id: ID, assignment_id: ID, file_path: &str, submitted_at: i64) -> Self {
        Self {
            id: Default::default(),
            student_id,
            assignment_id,
            file_path: file_path.into(),
            submitted_at,
        }
    }
}

impl Entity for Submission {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
