use crate::shared::{
    auth::protect_admin_route,
    usecase::{execute, UseCase},
};
use crate::error::NudgeError;
use actix_web::{web, HttpRequest, HttpResponse};
use nudge_api_structs::send_test_email::*;
use nudge_domain::ReminderEmail;
use nudge_infra::{EmailMessage, NudgeContext};
use tracing::error;

pub async fn send_test_email_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<NudgeContext>,
) -> Result<HttpResponse, NudgeError> {
    protect_admin_route(&http_req, &ctx).await?;

    let usecase = SendTestEmailUseCase {
        email: body.0.email,
    };

    execute(usecase, &ctx)
        .await
        .map(|recipient| {
            HttpResponse::Ok().json(APIResponse {
                message: format!("Test email sent to {}", recipient),
            })
        })
        .map_err(NudgeError::from)
}

/// Checks that the email provider is able to deliver
#[derive(Debug)]
pub struct SendTestEmailUseCase {
    pub email: String,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidEmail(String),
    SendFailed,
}

impl From<UseCaseError> for NudgeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidEmail(email) => {
                Self::BadClientData(format!("Invalid email address: {}", email))
            }
            UseCaseError::SendFailed => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendTestEmailUseCase {
    type Response = String;
    type Error = UseCaseError;

    const NAME: &'static str = "SendTestEmail";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        let recipient = self.email.trim().to_string();
        if recipient.is_empty() || !recipient.contains('@') {
            return Err(UseCaseError::InvalidEmail(recipient));
        }

        let message = EmailMessage::new(
            recipient.clone(),
            ReminderEmail::test(&recipient, ctx.sys.now()),
        );
        match ctx.email.send(&message).await {
            Ok(_) => Ok(recipient),
            Err(e) => {
                error!("Unable to send test email. Error: {:?}", e);
                Err(UseCaseError::SendFailed)
            }
        }
    }
}
