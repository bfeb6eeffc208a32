use crate::shared::{
    auth::protect_admin_route,
    usecase::{execute, UseCase},
};
use crate::{
    dispatch::{dispatch_reminders, DispatchReport},
    error::NudgeError,
};
use actix_web::{web, HttpRequest, HttpResponse};
use nudge_api_structs::send_all_reminders::*;
use nudge_infra::NudgeContext;

pub async fn send_all_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<NudgeContext>,
) -> Result<HttpResponse, NudgeError> {
    protect_admin_route(&http_req, &ctx).await?;

    execute(SendAllRemindersUseCase {}, &ctx)
        .await
        .map(|report| HttpResponse::Ok().json(APIResponse::new(report.notified_count())))
        .map_err(NudgeError::from)
}

/// Sends every due `Reminder` in the system, one email per `User`
#[derive(Debug)]
pub struct SendAllRemindersUseCase {}

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
impl UseCase for SendAllRemindersUseCase {
    type Response = DispatchReport;
    type Error = UseCaseError;

    const NAME: &'static str = "SendAllReminders";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        let candidates = ctx
            .repos
            .reminders
            .find_due(ctx.sys.now())
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(dispatch_reminders(candidates, ctx).await)
    }
}
