use super::ISubmissionRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use volp_domain::{Submission, ID};

pub struct PostgresSubmissionRepo {
    pool: PgPool,
}

impl PostgresSubmissionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SubmissionRaw {
    submission_uid: Uuid,
    student_uid: Uuid,
    assignment_uid: Uuid,
    file_path: String,
    submitted_at: i64,
}

impl From<SubmissionRaw> for Submission {
    fn from(raw: SubmissionRaw) -> Self {
        Submission {
            id: raw.submission_uid.into(),
            student_id: raw.student_uid.into(),
            assignment_id: raw.assignment_uid.into(),
            file_path: raw.file_path,
            submitted_at: raw.submitted_at,
        }
    }
}

#[async_trait::async_trait]
impl ISubmissionRepo for PostgresSubmissionRepo {
    async fn insert(&self, submission: &Submission) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO submissions(submission_uid, student_uid, assignment_uid, file_path, submitted_at)
            VALUES($1, $2, $3, $4, $5)
            "#,
        )
        .bind(submission.id.inner_ref())
        .bind(submission.student_id.inner_ref())
        .bind(submission.assignment_id.inner_ref())
        .bind(&submission.file_path)
        .bind(submission.submitted_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_assignment(&self, assignment_id: &ID) -> Vec<Submission> {
        let submissions: Vec<SubmissionRaw> = match sqlx::query_as(
            r#"
            SELECT * FROM submissions AS s
            WHERE s.assignment_uid = $1
            "#,
        )
        .bind(assignment_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        {
            Ok(submissions) => submissions,
            Err(_) => Vec::new(),
        };
        submissions.into_iter().map(|s| s.into()).collect()
    }
}
