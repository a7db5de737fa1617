use super::IAssignmentRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use volp_domain::{Assignment, ID};

pub struct PostgresAssignmentRepo {
    pool: PgPool,
}

impl PostgresAssignmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AssignmentRaw {
    assignment_uid: Uuid,
    course_uid: Uuid,
    title: String,
    deadline: i64,
}

impl From<AssignmentRaw> for Assignment {
    fn from(raw: AssignmentRaw) -> Self {
        Assignment {
            id: raw.assignment_uid.into(),
            course_id: raw.course_uid.into(),
            title: raw.title,
            deadline: raw.deadline,
        }
    }
}

#[async_trait::async_trait]
impl IAssignmentRepo for PostgresAssignmentRepo {
    async fn insert(&self, assignment: &Assignment) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO assignments(assignment_uid, course_uid, title, deadline)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(assignment.id.inner_ref())
        .bind(assignment.course_id.inner_ref())
        .bind(&assignment.title)
        .bind(assignment.deadline)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, assignment_id: &ID) -> Option<Assignment> {
        let assignment: Option<AssignmentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM assignments AS a
            WHERE a.assignment_uid = $1
            "#,
        )
        .bind(assignment_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten();
        assignment.map(|a| a.into())
    }

    async fn find_many(&self, assignment_ids: &[ID]) -> anyhow::Result<Vec<Assignment>> {
        let ids: Vec<Uuid> = assignment_ids.iter().map(|id| *id.inner_ref()).collect();
        let assignments: Vec<AssignmentRaw> = sqlx::query_as(
            r#"
            SELECT * FROM assignments AS a
            WHERE a.assignment_uid = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(assignments.into_iter().map(|a| a.into()).collect())
    }

    async fn find_by_course(&self, course_id: &ID) -> Vec<Assignment> {
        let assignments: Vec<AssignmentRaw> = match sqlx::query_as(
            r#"
            SELECT * FROM assignments AS a
            WHERE a.course_uid = $1
            "#,
        )
        .bind(course_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        {
            Ok(assignments) => assignments,
            Err(_) => Vec::new(),
        };
        assignments.into_iter().map(|a| a.into()).collect()
    }

    async fn delete_cascade(&self, assignment_id: &ID) -> anyhow::Result<bool> {
        // Dependents first, then the assignment itself, all inside one
        // transaction so a failure midway leaves nothing half-deleted.
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM reminders WHERE assignment_uid = $1")
            .bind(assignment_id.inner_ref())
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM submissions WHERE assignment_uid = $1")
            .bind(assignment_id.inner_ref())
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM notifications WHERE assignment_uid = $1")
            .bind(assignment_id.inner_ref())
            .execute(&mut *tx)
            .await?;
        let res = sqlx::query("DELETE FROM assignments WHERE assignment_uid = $1")
            .bind(assignment_id.inner_ref())
            .execute(&mut *tx)
            .await?;

        if res.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }
}
