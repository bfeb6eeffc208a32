use crate::dtos::ReminderDTO;
use chrono::{DateTime, Utc};
use nudge_domain::{UserReminders, ID};
use serde::{Deserialize, Serialize};

/// The due `Reminder`s of one `User`
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDueRemindersDTO {
    pub user_id: ID,
    pub email: Option<String>,
    pub reminders: Vec<ReminderDTO>,
    pub date: DateTime<Utc>,
}

impl UserDueRemindersDTO {
    pub fn new(user_reminders: &UserReminders, email: Option<String>) -> Self {
        Self {
            user_id: user_reminders.user_id.clone(),
            email,
            reminders: user_reminders
                .due_reminders()
                .into_iter()
                .map(|r| r.to_record(user_reminders.date))
                .collect(),
            date: user_reminders.date,
        }
    }
}
