use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use crate::error::NudgeError;
use actix_web::{web, HttpRequest, HttpResponse};
use nudge_api_structs::get_reminders::*;
use nudge_domain::{Reminder, ID};
use nudge_infra::NudgeContext;

pub async fn get_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<NudgeContext>,
) -> Result<HttpResponse, NudgeError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetRemindersUseCase { user_id: user.id };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(&reminders, ctx.sys.now())))
        .map_err(NudgeError::from)
}

#[derive(Debug)]
pub struct GetRemindersUseCase {
    pub user_id: ID,
}

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
impl UseCase for GetRemindersUseCase {
    type Response = Vec<Reminder>;
    type Error = UseCaseError;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .reminders
            .find_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
