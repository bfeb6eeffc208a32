use crate::shared::{
    auth::protect_admin_route,
    usecase::{execute, UseCase},
};
use crate::{
    dispatch::{dispatch_reminders, UserDispatchOutcome},
    error::NudgeError,
};
use actix_web::{web, HttpRequest, HttpResponse};
use nudge_api_structs::send_user_due_reminders::*;
use nudge_domain::ID;
use nudge_infra::NudgeContext;

pub async fn send_user_due_reminders_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<NudgeContext>,
) -> Result<HttpResponse, NudgeError> {
    protect_admin_route(&http_req, &ctx).await?;

    let usecase = SendUserDueRemindersUseCase {
        user_id: path.user_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                recipient: res.recipient,
                count: res.count,
            })
        })
        .map_err(NudgeError::from)
}

/// Sends the due `Reminder`s of one `User` without waiting for the scheduled run
#[derive(Debug)]
pub struct SendUserDueRemindersUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub recipient: String,
    /// Number of `Reminder`s in the sent email
    pub count: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    UserNotFound(ID),
    NoDueReminders(ID),
    SendFailed,
    StorageError,
}

impl From<UseCaseError> for NudgeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UserNotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
            UseCaseError::NoDueReminders(user_id) => Self::NotFound(format!(
                "The user with id: {}, has no due reminders.",
                user_id
            )),
            UseCaseError::SendFailed | UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendUserDueRemindersUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "SendUserDueReminders";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        let user = match ctx.repos.users.find(&self.user_id).await {
            Some(user) => user,
            None => return Err(UseCaseError::UserNotFound(self.user_id.clone())),
        };
        let candidates = ctx
            .repos
            .reminders
            .find_due_by_user(&user.id, ctx.sys.now())
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let report = dispatch_reminders(candidates, ctx).await;
        match report.outcomes.get(&user.id) {
            Some(UserDispatchOutcome::Sent { reminders }) => Ok(UseCaseRes {
                recipient: user.email,
                count: reminders.len(),
            }),
            Some(UserDispatchOutcome::SendFailed) => Err(UseCaseError::SendFailed),
            Some(UserDispatchOutcome::RecipientNotFound) => {
                Err(UseCaseError::UserNotFound(user.id))
            }
            Some(UserDispatchOutcome::NothingDue) | None => {
                Err(UseCaseError::NoDueReminders(user.id))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_utils::{now, setup, TestContext};
    use chrono::Duration;
    use nudge_domain::{Reminder, User};

    async fn insert_reminder(ctx: &NudgeContext, user: &User, days_since_last: i64) -> Reminder {
        let mut reminder =
            Reminder::new(user.id.clone(), "acme".into(), "Acme".into(), 7, now()).unwrap();
        reminder.last_reminder_date = Some(now() - Duration::days(days_since_last));
        ctx.repos.reminders.insert(&reminder).await.unwrap();
        reminder
    }

    #[actix_web::main]
    #[test]
    async fn sends_only_that_users_due_reminders() {
        let TestContext { ctx, email } = setup();
        let user = User::new("one@example.com".into(), now());
        let other = User::new("two@example.com".into(), now());
        ctx.repos.users.insert(&user).await.unwrap();
        ctx.repos.users.insert(&other).await.unwrap();
        insert_reminder(&ctx, &user, 8).await;
        insert_reminder(&ctx, &user, 9).await;
        insert_reminder(&ctx, &user, 2).await;
        let others = insert_reminder(&ctx, &other, 8).await;

        let usecase = SendUserDueRemindersUseCase {
            user_id: user.id.clone(),
        };
        let res = execute(usecase, &ctx).await.unwrap();
        assert_eq!(res.recipient, "one@example.com");
        assert_eq!(res.count, 2);
        assert_eq!(email.sent().len(), 1);
        assert_eq!(
            ctx.repos.reminders.find(&others.id).await.unwrap().last_reminder_date,
            others.last_reminder_date
        );
    }

    #[actix_web::main]
    #[test]
    async fn nothing_due_is_not_found() {
        let TestContext { ctx, email } = setup();
        let user = User::new("one@example.com".into(), now());
        ctx.repos.users.insert(&user).await.unwrap();
        insert_reminder(&ctx, &user, 2).await;

        let usecase = SendUserDueRemindersUseCase {
            user_id: user.id.clone(),
        };
        let res = execute(usecase, &ctx).await;
        assert!(matches!(res, Err(UseCaseError::NoDueReminders(_))));
        assert!(email.sent().is_empty());

        let usecase = SendUserDueRemindersUseCase {
            user_id: ID::default(),
        };
        let res = execute(usecase, &ctx).await;
        assert!(matches!(res, Err(UseCaseError::UserNotFound(_))));
    }
}
