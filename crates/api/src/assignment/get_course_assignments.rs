use crate::error::VolpError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use volp_api_structs::get_course_assignments::*;
use volp_domain::{Assignment, ID};
use volp_infra::VolpContext;

pub async fn get_course_assignments_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<VolpContext>,
) -> Result<HttpResponse, VolpError> {
    let usecase = GetCourseAssignmentsUseCase {
        course_id: path_params.course_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|assignments| HttpResponse::Ok().json(APIResponse::new(assignments)))
        .map_err(VolpError::from)
}

#[derive(Debug)]
pub struct GetCourseAssignmentsUseCase {
    pub course_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    CourseNotFound(ID),
}

impl From<UseCaseError> for VolpError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::CourseNotFound(course_id) => Self::NotFound(format!(
                "The course with id: {}, was not found.",
                course_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetCourseAssignmentsUseCase {
    type Response = Vec<Assignment>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetCourseAssignments";

    async fn execute(&mut self, ctx: &VolpContext) -> Result<Self::Response, Self::Error> {
        if ctx.repos.courses.find(&self.course_id).await.is_none() {
            return Err(UseCaseError::CourseNotFound(self.course_id.clone()));
        }

        Ok(ctx.repos.assignments.find_by_course(&self.course_id).await)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use volp_domain::{Course, User, UserRole};

    #[actix_web::main]
    #[test]
    async fn lists_only_the_courses_assignments() {
        let ctx = VolpContext::create_inmemory();
        let admin = User::new("Ada Price", "ada@volp.io", UserRole::Admin);
        ctx.repos.users.insert(&admin).await.unwrap();
        let course = Course::new("Algorithms", "ALG-101", admin.id.clone());
        let other_course = Course::new("Databases", "DB-201", admin.id.clone());
        ctx.repos.courses.insert(&course).await.unwrap();
        ctx.repos.courses.insert(&other_course).await.unwrap();

        let assignment = Assignment::new(course.id.clone(), "Lab 1", 2_000_000_000_000);
        let other = Assignment::new(other_course.id.clone(), "Lab 9", 2_000_000_000_000);
        ctx.repos.assignments.insert(&assignment).await.unwrap();
        ctx.repos.assignments.insert(&other).await.unwrap();

        let mut usecase = GetCourseAssignmentsUseCase {
            course_id: course.id.clone(),
        };

        let res = usecase.execute(&ctx).await.unwrap();
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].id, assignment.id);
    }

    #[actix_web::main]
    #[test]
    async fn unknown_course_is_not_found() {
        let ctx = VolpContext::create_inmemory();

        let unknown = ID::new();
        let mut usecase = GetCourseAssignmentsUseCase {
            course_id: unknown.clone(),
        };

        let res = usecase.execute(&ctx).await;

        assert_eq!(res.unwrap_err(), UseCaseError::CourseNotFound(unknown));
    }
}
