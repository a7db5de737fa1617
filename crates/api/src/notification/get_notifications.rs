use crate::error::VolpError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use volp_api_structs::get_notifications::*;
use volp_domain::{Notification, ID};
use volp_infra::VolpContext;

pub async fn get_notifications_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<VolpContext>,
) -> Result<HttpResponse, VolpError> {
    let usecase = GetNotificationsUseCase {
        student_id: path_params.student_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|notifications| HttpResponse::Ok().json(APIResponse::new(notifications)))
        .map_err(VolpError::from)
}

#[derive(Debug)]
pub struct GetNotificationsUseCase {
    pub student_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for VolpError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetNotificationsUseCase {
    type Response = Vec<Notification>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetNotifications";

    async fn execute(&mut self, ctx: &VolpContext) -> Result<Self::Response, Self::Error> {
        // Newest first, unknown students simply get an empty list
        ctx.repos
            .notifications
            .find_by_student(&self.student_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[actix_web::main]
    #[test]
    async fn lists_notifications_newest_first() {
        let ctx = VolpContext::create_inmemory();
        let student_id = ID::new();
        let assignment_id = ID::new();

        for i in 0..3 {
            let notification = Notification::new(
                student_id.clone(),
                assignment_id.clone(),
                format!("Subject {}", i),
                format!("Message {}", i),
                1_000 + i,
            );
            ctx.repos.notifications.insert(&notification).await.unwrap();
        }

        let mut usecase = GetNotificationsUseCase {
            student_id: student_id.clone(),
        };
        let res = usecase.execute(&ctx).await.unwrap();

        assert_eq!(res.len(), 3);
        assert_eq!(res[0].created_at, 1_002);
        assert_eq!(res[2].created_at, 1_000);
    }

    #[actix_web::main]
    #[test]
    async fn unknown_student_gets_an_empty_list() {
        let ctx = VolpContext::create_inmemory();

        let mut usecase = GetNotificationsUseCase {
            student_id: ID::new(),
        };
        let res = usecase.execute(&ctx).await.unwrap();

        assert!(res.is_empty());
    }
}
