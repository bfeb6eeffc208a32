use crate::shared::{
    auth::protect_admin_route,
    usecase::{execute, UseCase},
};
use crate::error::NudgeError;
use actix_web::{web, HttpRequest, HttpResponse};
use nudge_api_structs::{dtos::UserDueRemindersDTO, get_due_reminders::*};
use nudge_domain::UserReminders;
use nudge_infra::NudgeContext;

pub async fn get_due_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<NudgeContext>,
) -> Result<HttpResponse, NudgeError> {
    protect_admin_route(&http_req, &ctx).await?;

    execute(GetDueRemindersUseCase {}, &ctx)
        .await
        .map(|due| {
            HttpResponse::Ok().json(APIResponse {
                user_reminders: due
                    .iter()
                    .map(|(reminders, email)| UserDueRemindersDTO::new(reminders, email.clone()))
                    .collect(),
            })
        })
        .map_err(NudgeError::from)
}

/// Every `User` with due `Reminder`s, together with their email if it is known
#[derive(Debug)]
pub struct GetDueRemindersUseCase {}

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
impl UseCase for GetDueRemindersUseCase {
    type Response = Vec<(UserReminders, Option<String>)>;
    type Error = UseCaseError;

    const NAME: &'static str = "GetDueReminders";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.now();
        let candidates = ctx
            .repos
            .reminders
            .find_due(now)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut due = Vec::new();
        for user_reminders in UserReminders::group_by_user(candidates, now) {
            if !user_reminders.has_due_reminders() {
                continue;
            }
            let email = ctx
                .repos
                .users
                .find(&user_reminders.user_id)
                .await
                .map(|user| user.email);
            due.push((user_reminders, email));
        }

        Ok(due)
    }
}
