use super::ICourseRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use volp_domain::{Course, ID};

pub struct PostgresCourseRepo {
    pool: PgPool,
}

impl PostgresCourseRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CourseRaw {
    course_uid: Uuid,
    name: String,
    code: String,
    created_by_uid: Uuid,
}

impl From<CourseRaw> for Course {
    fn from(raw: CourseRaw) -> Self {
        Course {
            id: raw.course_uid.into(),
            name: raw.name,
            code: raw.code,
            created_by: raw.created_by_uid.into(),
        }
    }
}

#[async_trait::async_trait]
impl ICourseRepo for PostgresCourseRepo {
    async fn insert(&self, course: &Course) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO courses(course_uid, name, code, created_by_uid)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(course.id.inner_ref())
        .bind(&course.name)
        .bind(&course.code)
        .bind(course.created_by.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, course_id: &ID) -> Option<Course> {
        let course: Option<CourseRaw> = sqlx::query_as(
            r#"
            SELECT * FROM courses AS c
            WHERE c.course_uid = $1
            "#,
        )
        .bind(course_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten();
        course.map(|c| c.into())
    }

    async fn find_many(&self, course_ids: &[ID]) -> anyhow::Result<Vec<Course>> {
        let ids: Vec<Uuid> = course_ids.iter().map(|id| *id.inner_ref()).collect();
        let courses: Vec<CourseRaw> = sqlx::query_as(
            r#"
            SELECT * FROM courses AS c
            WHERE c.course_uid = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(courses.into_iter().map(|c| c.into()).collect())
    }
}
