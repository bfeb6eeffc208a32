use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use crate::error::NudgeError;
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use nudge_api_structs::update_reminder::*;
use nudge_domain::{InvalidReminderError, Reminder, ID};
use nudge_infra::NudgeContext;

pub async fn update_reminder_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<NudgeContext>,
) -> Result<HttpResponse, NudgeError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = UpdateReminderUseCase {
        user_id: user.id,
        reminder_id: path.reminder_id.clone(),
        days_between_reminders: body.days_between_reminders,
        company_user_id: body.company_user_id,
        last_reminder_date: body.last_reminder_date,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(&reminder, ctx.sys.now())))
        .map_err(NudgeError::from)
}

#[derive(Debug)]
pub struct UpdateReminderUseCase {
    pub user_id: ID,
    pub reminder_id: ID,
    pub days_between_reminders: Option<i64>,
    pub company_user_id: Option<String>,
    pub last_reminder_date: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidReminder(InvalidReminderError),
    StorageError,
}

impl From<UseCaseError> for NudgeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::InvalidReminder(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateReminderUseCase {
    type Response = Reminder;
    type Error = UseCaseError;

    const NAME: &'static str = "UpdateReminder";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(reminder) if reminder.user_id == self.user_id => reminder,
            _ => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
        };

        if let Some(days_between_reminders) = self.days_between_reminders {
            reminder.days_between_reminders = days_between_reminders;
        }
        if let Some(company_user_id) = &self.company_user_id {
            let company_user_id = company_user_id.trim();
            reminder.company_user_id = if company_user_id.is_empty() {
                None
            } else {
                Some(company_user_id.to_string())
            };
        }
        if let Some(last_reminder_date) = self.last_reminder_date {
            reminder.last_reminder_date = Some(last_reminder_date);
        }
        reminder.validate().map_err(UseCaseError::InvalidReminder)?;

        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map(|_| reminder)
            .map_err(|_| UseCaseError::StorageError)
    }
}
