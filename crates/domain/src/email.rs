use crate::reminder::Reminder;
use chrono::{DateTime, Utc};
use handlebars::html_escape;

pub const DUE_REMINDERS_SUBJECT: &str = "Reminder: Companies Due Today";

const CLOSING: &str = "Best regards,\nYour Reminder System";

/// The content of a notification email. `html` always renders
/// the same content as `text`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderEmail {
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Html rendering of a plain text body where every newline becomes a `<br>`
fn text_to_html(text: &str) -> String {
    html_escape(text).replace('\n', "<br>")
}

impl ReminderEmail {
    fn from_text(subject: String, text: String) -> Self {
        let html = text_to_html(&text);
        Self {
            subject,
            text,
            html,
        }
    }

    /// One email listing every given `Reminder` in the given order
    pub fn due_reminders(reminders: &[&Reminder]) -> Self {
        let reminder_list = reminders
            .iter()
            .map(|reminder| reminder.email_line())
            .collect::<Vec<_>>()
            .join("\n");
        let text = format!(
            "Hello,\n\nYou have the following reminders due today:\n\n{}\n\nPlease take action on these reminders.\n\n{}",
            reminder_list, CLOSING
        );
        Self::from_text(DUE_REMINDERS_SUBJECT.into(), text)
    }

    /// Email for a single `Reminder`, sent on request regardless of its due state
    pub fn single(reminder: &Reminder) -> Self {
        let text = format!(
            "Hello,\n\nYou have a reminder for {}.\n\nPlease take action on this reminder.\n\n{}",
            reminder.company_name, CLOSING
        );
        Self::from_text(format!("Reminder: {}", reminder.company_name), text)
    }

    pub fn test(recipient: &str, now: DateTime<Utc>) -> Self {
        let timestamp = now.format("%-m/%-d/%Y, %H:%M:%S UTC");
        let text = format!("This is a test email sent at {}", timestamp);
        let html = format!("<p>{}</p>", html_escape(&text));
        Self {
            subject: format!("Test Email to {}", recipient),
            text,
            html,
        }
    }
}
