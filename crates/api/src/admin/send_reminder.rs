use crate::shared::{
    auth::protect_admin_route,
    usecase::{execute, UseCase},
};
use crate::error::NudgeError;
use actix_web::{web, HttpRequest, HttpResponse};
use nudge_api_structs::send_reminder::*;
use nudge_domain::{Reminder, ReminderEmail, ID};
use nudge_infra::{EmailMessage, NudgeContext};
use tracing::error;

pub async fn send_reminder_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<NudgeContext>,
) -> Result<HttpResponse, NudgeError> {
    protect_admin_route(&http_req, &ctx).await?;

    let usecase = SendReminderUseCase {
        reminder_id: path.reminder_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                recipient: res.recipient,
                reminder: res.reminder.to_record(ctx.sys.now()),
            })
        })
        .map_err(NudgeError::from)
}

/// Sends a single `Reminder` right away, due or not
#[derive(Debug)]
pub struct SendReminderUseCase {
    pub reminder_id: ID,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub recipient: String,
    pub reminder: Reminder,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    RecipientNotFound(ID),
    SendFailed,
}

impl From<UseCaseError> for NudgeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::RecipientNotFound(user_id) => Self::NotFound(format!(
                "The owner of the reminder, user with id: {}, was not found.",
                user_id
            )),
            UseCaseError::SendFailed => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendReminderUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "SendReminder";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(reminder) => reminder,
            None => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
        };
        let user = match ctx.repos.users.find(&reminder.user_id).await {
            Some(user) => user,
            None => return Err(UseCaseError::RecipientNotFound(reminder.user_id.clone())),
        };

        let message = EmailMessage::new(user.email.clone(), ReminderEmail::single(&reminder));
        if let Err(e) = ctx.email.send(&message).await {
            error!("Unable to send reminder: {}. Error: {:?}", reminder.id, e);
            return Err(UseCaseError::SendFailed);
        }

        let now = ctx.sys.now();
        if let Err(e) = ctx
            .repos
            .reminders
            .update_last_reminder_date(&reminder.id, now)
            .await
        {
            error!(
                "Sent reminder: {} but was unable to record it. Error: {:?}",
                reminder.id, e
            );
        }
        reminder.last_reminder_date = Some(now);

        Ok(UseCaseRes {
            recipient: user.email,
            reminder,
        })
    }
}
