use super::{EmailMessage, IEmailProvider};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::error;

const RESEND_API_URL: &str = "https://api.resend.com/emails";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// Delivers emails through the Resend http api
pub struct ResendEmailProvider {
    client: Client,
    api_key: String,
    from: String,
}

impl ResendEmailProvider {
    pub fn new(api_key: String, from: String) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            api_key,
            from,
        })
    }
}

#[async_trait::async_trait]
impl IEmailProvider for ResendEmailProvider {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
        let body = SendEmailRequest {
            from: &self.from,
            to: vec![&message.to],
            subject: &message.subject,
            text: &message.text,
            html: &message.html,
        };

        let res = match self
            .client
            .post(RESEND_API_URL)
            .header("authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => {
                error!("[Network Error] Resend API POST error. Error message: {:?}", e);
                return Err(anyhow::Error::new(e));
            }
        };

        let status = res.status();
        if !status.is_success() {
            let reason = res.text().await.unwrap_or_default();
            error!(
                "[Unexpected Response] Resend API responded with status: {}. Body: {}",
                status, reason
            );
            return Err(anyhow::Error::msg(format!(
                "Resend API responded with status: {}",
                status
            )));
        }

        match res.json::<SendEmailResponse>().await {
            Ok(sent) => {
                tracing::debug!("Email delivered to {} with id: {}", message.to, sent.id);
                Ok(())
            }
            Err(e) => {
                // Delivery was accepted, only the body was unexpected
                error!("[Unexpected Response] Resend API POST error. Error message: {:?}", e);
                Ok(())
            }
        }
    }
}
