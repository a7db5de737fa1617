use super::IMembershipRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use volp_domain::{CourseMembership, ID};

pub struct PostgresMembershipRepo {
    pool: PgPool,
}

impl PostgresMembershipRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MembershipRaw {
    course_uid: Uuid,
    student_uid: Uuid,
}

impl From<MembershipRaw> for CourseMembership {
    fn from(raw: MembershipRaw) -> Self {
        CourseMembership {
            course_id: raw.course_uid.into(),
            student_id: raw.student_uid.into(),
        }
    }
}

#[async_trait::async_trait]
impl IMembershipRepo for PostgresMembershipRepo {
    async fn insert(&self, membership: &CourseMembership) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO course_memberships(course_uid, student_uid)
            VALUES($1, $2)
            "#,
        )
        .bind(membership.course_id.inner_ref())
        .bind(membership.student_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_course(&self, course_id: &ID) -> Vec<CourseMembership> {
        let memberships: Vec<MembershipRaw> = match sqlx::query_as(
            r#"
            SELECT * FROM course_memberships AS m
            WHERE m.course_uid = $1
            "#,
        )
        .bind(course_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        {
            Ok(memberships) => memberships,
            Err(_) => Vec::new(),
        };
        memberships.into_iter().map(|m| m.into()).collect()
    }
}
