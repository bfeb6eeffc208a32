use crate::shared::{
    auth::protect_admin_route,
    usecase::{execute, UseCase},
};
use crate::error::NudgeError;
use actix_web::{web, HttpRequest, HttpResponse};
use nudge_api_structs::{dtos::UserDTO, get_users::*};
use nudge_domain::User;
use nudge_infra::NudgeContext;

pub async fn get_users_controller(
    http_req: HttpRequest,
    ctx: web::Data<NudgeContext>,
) -> Result<HttpResponse, NudgeError> {
    protect_admin_route(&http_req, &ctx).await?;

    execute(GetUsersUseCase {}, &ctx)
        .await
        .map(|users| {
            HttpResponse::Ok().json(APIResponse {
                users: users.into_iter().map(UserDTO::new).collect(),
            })
        })
        .map_err(NudgeError::from)
}

#[derive(Debug)]
pub struct GetUsersUseCase {}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for NudgeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUsersUseCase {
    type Response = Vec<User>;
    type Error = UseCaseError;

    const NAME: &'static str = "GetUsers";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .users
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
