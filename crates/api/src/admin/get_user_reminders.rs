use crate::shared::{
    auth::protect_admin_route,
    usecase::{execute, UseCase},
};
use crate::error::NudgeError;
use actix_web::{web, HttpRequest, HttpResponse};
use nudge_api_structs::{dtos::UserDTO, get_user_reminders::*};
use nudge_domain::{Reminder, User, ID};
use nudge_infra::NudgeContext;

pub async fn get_user_reminders_controller(
    http_req: HttpRequest,
    path: web::Path<PathParams>,
    ctx: web::Data<NudgeContext>,
) -> Result<HttpResponse, NudgeError> {
    protect_admin_route(&http_req, &ctx).await?;

    let usecase = GetUserRemindersUseCase {
        user_id: path.user_id.clone(),
    };

    let now = ctx.sys.now();
    execute(usecase, &ctx)
        .await
        .map(|(user, reminders)| {
            HttpResponse::Ok().json(APIResponse {
                user: UserDTO::new(user),
                reminders: reminders.iter().map(|r| r.to_record(now)).collect(),
            })
        })
        .map_err(NudgeError::from)
}

#[derive(Debug)]
pub struct GetUserRemindersUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    UserNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for NudgeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UserNotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUserRemindersUseCase {
    type Response = (User, Vec<Reminder>);
    type Error = UseCaseError;

    const NAME: &'static str = "GetUserReminders";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        let user = match ctx.repos.users.find(&self.user_id).await {
            Some(user) => user,
            None => return Err(UseCaseError::UserNotFound(self.user_id.clone())),
        };
        let reminders = ctx
            .repos
            .reminders
            .find_by_user(&user.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok((user, reminders))
    }
}
