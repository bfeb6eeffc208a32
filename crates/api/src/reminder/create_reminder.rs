use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use crate::error::NudgeError;
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use nudge_api_structs::create_reminder::*;
use nudge_domain::{InvalidReminderError, Reminder, ID};
use nudge_infra::NudgeContext;

pub async fn create_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<NudgeContext>,
) -> Result<HttpResponse, NudgeError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateReminderUseCase {
        user_id: user.id,
        company_id: body.company_id,
        company_name: body.company_name,
        company_user_id: body.company_user_id,
        days_between_reminders: body.days_between_reminders,
        last_reminder_date: body.last_reminder_date,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| {
            HttpResponse::Created().json(APIResponse::new(&reminder, ctx.sys.now()))
        })
        .map_err(NudgeError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub user_id: ID,
    pub company_id: String,
    pub company_name: String,
    pub company_user_id: Option<String>,
    pub days_between_reminders: i64,
    pub last_reminder_date: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidReminder(InvalidReminderError),
    StorageError,
}

impl From<UseCaseError> for NudgeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidReminder(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = Reminder::new(
            self.user_id.clone(),
            self.company_id.trim().to_string(),
            self.company_name.trim().to_string(),
            self.days_between_reminders,
            ctx.sys.now(),
        )
        .map_err(UseCaseError::InvalidReminder)?;
        reminder.company_user_id = self
            .company_user_id
            .take()
            .filter(|company_user_id| !company_user_id.trim().is_empty());
        reminder.last_reminder_date = self.last_reminder_date;

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map(|_| reminder)
            .map_err(|_| UseCaseError::StorageError)
    }
}
