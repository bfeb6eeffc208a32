use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use crate::error::NudgeError;
use actix_web::{web, HttpRequest, HttpResponse};
use nudge_api_structs::delete_reminder::*;
use nudge_domain::{Reminder, ID};
use nudge_infra::NudgeContext;

pub async fn delete_reminder_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<NudgeContext>,
) -> Result<HttpResponse, NudgeError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteReminderUseCase {
        user_id: user.id,
        reminder_id: path.reminder_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(&reminder, ctx.sys.now())))
        .map_err(NudgeError::from)
}

#[derive(Debug)]
pub struct DeleteReminderUseCase {
    pub user_id: ID,
    pub reminder_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for NudgeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteReminderUseCase {
    type Response = Reminder;
    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminder";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        let reminder = ctx.repos.reminders.find(&self.reminder_id).await;
        match reminder {
            Some(reminder) if reminder.user_id == self.user_id => ctx
                .repos
                .reminders
                .delete(&reminder.id)
                .await
                .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone())),
            _ => Err(UseCaseError::NotFound(self.reminder_id.clone())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_utils::{now, setup};

    #[actix_web::main]
    #[test]
    async fn deletes_own_reminder_only() {
        let ctx = setup().ctx;
        let reminder =
            Reminder::new(ID::default(), "acme".into(), "Acme".into(), 30, now()).unwrap();
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let usecase = DeleteReminderUseCase {
            user_id: ID::default(),
            reminder_id: reminder.id.clone(),
        };
        assert!(execute(usecase, &ctx).await.is_err());
        assert!(ctx.repos.reminders.find(&reminder.id).await.is_some());

        let usecase = DeleteReminderUseCase {
            user_id: reminder.user_id.clone(),
            reminder_id: reminder.id.clone(),
        };
        let deleted = execute(usecase, &ctx).await.unwrap();
        assert_eq!(deleted, reminder);
        assert!(ctx.repos.reminders.find(&reminder.id).await.is_none());
    }
}
