use crate::error::VolpError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use volp_api_structs::mark_notification_read::*;
use volp_domain::ID;
use volp_infra::VolpContext;

pub async fn mark_notification_read_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<VolpContext>,
) -> Result<HttpResponse, VolpError> {
    let usecase = MarkNotificationReadUseCase {
        notification_id: path_params.notification_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|_| {
            HttpResponse::Ok().json(APIResponse {
                message: "Notification marked as read".into(),
            })
        })
        .map_err(VolpError::from)
}

#[derive(Debug)]
pub struct MarkNotificationReadUseCase {
    pub notification_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for VolpError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(notification_id) => Self::NotFound(format!(
                "The notification with id: {}, was not found.",
                notification_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for MarkNotificationReadUseCase {
    type Response = ();

    type Error = UseCaseError;

    const NAME: &'static str = "MarkNotificationRead";

    async fn execute(&mut self, ctx: &VolpContext) -> Result<Self::Response, Self::Error> {
        let updated = ctx
            .repos
            .notifications
            .mark_read(&self.notification_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        if !updated {
            return Err(UseCaseError::NotFound(self.notification_id.clone()));
        }

        Ok(())
    }
}
