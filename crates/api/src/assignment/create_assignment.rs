use super::subscribers::{CreateRemindersOnNewAssignment, NotifyStudentsOnNewAssignment};
use crate::error::VolpError;
use crate::shared::usecase::{execute, Subscriber, UseCase};
use actix_web::{web, HttpResponse};
use volp_api_structs::create_assignment::*;
use volp_domain::{Assignment, ID};
use volp_infra::VolpContext;

pub async fn create_assignment_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<VolpContext>,
) -> Result<HttpResponse, VolpError> {
    let body = body.0;
    let usecase = CreateAssignmentUseCase {
        course_id: body.course_id,
        title: body.title,
        deadline: body.deadline,
    };

    execute(usecase, &ctx)
        .await
        .map(|assignment| HttpResponse::Created().json(APIResponse::new(assignment)))
        .map_err(VolpError::from)
}

#[derive(Debug)]
pub struct CreateAssignmentUseCase {
    pub course_id: ID,
    pub title: String,
    pub deadline: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidTitle,
    CourseNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for VolpError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidTitle => {
                Self::BadClientData("Assignment title cannot be empty".into())
            }
            UseCaseError::CourseNotFound(course_id) => Self::NotFound(format!(
                "The course with id: {}, was not found.",
                course_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateAssignmentUseCase {
    type Response = Assignment;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateAssignment";

    async fn execute(&mut self, ctx: &VolpContext) -> Result<Self::Response, Self::Error> {
        if self.title.trim().is_empty() {
            return Err(UseCaseError::InvalidTitle);
        }

        if ctx.repos.courses.find(&self.course_id).await.is_none() {
            return Err(UseCaseError::CourseNotFound(self.course_id.clone()));
        }

        let assignment = Assignment::new(self.course_id.clone(), &self.title, self.deadline);

        ctx.repos
            .assignments
            .insert(&assignment)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(assignment)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![
            Box::new(CreateRemindersOnNewAssignment),
            Box::new(NotifyStudentsOnNewAssignment),
        ]
    }
}
