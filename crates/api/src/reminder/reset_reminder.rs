use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use crate::error::NudgeError;
use actix_web::{web, HttpRequest, HttpResponse};
use nudge_api_structs::reset_reminder::*;
use nudge_domain::{Reminder, ID};
use nudge_infra::NudgeContext;

pub async fn reset_reminder_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<NudgeContext>,
) -> Result<HttpResponse, NudgeError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = ResetReminderUseCase {
        user_id: user.id,
        reminder_id: path.reminder_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(&reminder, ctx.sys.now())))
        .map_err(NudgeError::from)
}

/// Restarts the interval of a `Reminder` from now, e.g. after the `User`
/// took care of it without waiting for the email
#[derive(Debug)]
pub struct ResetReminderUseCase {
    pub user_id: ID,
    pub reminder_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for NudgeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ResetReminderUseCase {
    type Response = Reminder;
    type Error = UseCaseError;

    const NAME: &'static str = "ResetReminder";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(reminder) if reminder.user_id == self.user_id => reminder,
            _ => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
        };

        let now = ctx.sys.now();
        ctx.repos
            .reminders
            .update_last_reminder_date(&reminder.id, now)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        reminder.last_reminder_date = Some(now);

        Ok(reminder)
    }
}
