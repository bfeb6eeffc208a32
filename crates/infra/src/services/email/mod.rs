mod inmemory;
mod resend;

pub use inmemory::InMemoryEmailProvider;
use nudge_domain::ReminderEmail;
pub use resend::ResendEmailProvider;

/// A fully composed email ready to be handed over to an `IEmailProvider`
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl EmailMessage {
    pub fn new(to: String, email: ReminderEmail) -> Self {
        Self {
            to,
            subject: email.subject,
            text: email.text,
            html: email.html,
        }
    }
}

#[async_trait::async_trait]
pub trait IEmailProvider: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()>;
}
