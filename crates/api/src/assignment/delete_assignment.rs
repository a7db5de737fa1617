use crate::error::VolpError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use volp_api_structs::delete_assignment::*;
use volp_domain::ID;
use volp_infra::VolpContext;

pub async fn delete_assignment_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<VolpContext>,
) -> Result<HttpResponse, VolpError> {
    let usecase = DeleteAssignmentUseCase {
        assignment_id: path_params.assignment_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|_| {
            HttpResponse::Ok().json(APIResponse {
                message: "Assignment and all related records deleted".into(),
            })
        })
        .map_err(VolpError::from)
}

/// Removes the assignment together with its submissions, reminders and
/// notifications in one transaction, so a half-deleted assignment can
/// never leave orphaned reminders behind for the sweep to chew on.
#[derive(Debug)]
pub struct DeleteAssignmentUseCase {
    pub assignment_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for VolpError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(assignment_id) => Self::NotFound(format!(
                "The assignment with id: {}, was not found.",
                assignment_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteAssignmentUseCase {
    type Response = ();

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteAssignment";

    async fn execute(&mut self, ctx: &VolpContext) -> Result<Self::Response, Self::Error> {
        let deleted = ctx
            .repos
            .assignments
            .delete_cascade(&self.assignment_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        if !deleted {
            return Err(UseCaseError::NotFound(self.assignment_id.clone()));
        }

        Ok(())
    }
}
