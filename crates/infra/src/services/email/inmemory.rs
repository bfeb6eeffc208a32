use super::{EmailMessage, IEmailProvider};
use std::sync::Mutex;

/// Keeps every sent email in memory. Used in tests and when no email
/// api key is configured.
pub struct InMemoryEmailProvider {
    sent: Mutex<Vec<EmailMessage>>,
    failing_recipients: Mutex<Vec<String>>,
}

impl InMemoryEmailProvider {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(vec![]),
            failing_recipients: Mutex::new(vec![]),
        }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, recipient: &str) -> Vec<EmailMessage> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.to == recipient)
            .cloned()
            .collect()
    }

    /// Every later send to `recipient` will fail
    pub fn fail_for(&self, recipient: &str) {
        self.failing_recipients
            .lock()
            .unwrap()
            .push(recipient.to_string());
    }
}

impl Default for InMemoryEmailProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IEmailProvider for InMemoryEmailProvider {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
        let failing = self
            .failing_recipients
            .lock()
            .unwrap()
            .iter()
            .any(|r| *r == message.to);
        if failing {
            return Err(anyhow::Error::msg(format!(
                "Unable to deliver email to: {}",
                message.to
            )));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}
