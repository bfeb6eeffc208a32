use crate::dtos::ReminderDTO;
use chrono::{DateTime, Utc};
use nudge_domain::{Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: ReminderDTO,
}

impl ReminderResponse {
    pub fn new(reminder: &Reminder, now: DateTime<Utc>) -> Self {
        Self {
            reminder: reminder.to_record(now),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemindersResponse {
    pub reminders: Vec<ReminderDTO>,
}

impl RemindersResponse {
    pub fn new(reminders: &[Reminder], now: DateTime<Utc>) -> Self {
        Self {
            reminders: reminders.iter().map(|r| r.to_record(now)).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ReminderPathParams {
    pub reminder_id: ID,
}

pub mod create_reminder {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub company_id: String,
        pub company_name: String,
        #[serde(default)]
        pub company_user_id: Option<String>,
        pub days_between_reminders: i64,
        #[serde(default)]
        pub last_reminder_date: Option<DateTime<Utc>>,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod get_reminders {
    use super::*;

    pub type APIResponse = RemindersResponse;
}

pub mod update_reminder {
    use super::*;

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub days_between_reminders: Option<i64>,
        /// An empty string removes the company user id
        #[serde(default)]
        pub company_user_id: Option<String>,
        #[serde(default)]
        pub last_reminder_date: Option<DateTime<Utc>>,
    }

    pub type PathParams = ReminderPathParams;

    pub type APIResponse = ReminderResponse;
}

pub mod reset_reminder {
    use super::*;

    pub type PathParams = ReminderPathParams;

    pub type APIResponse = ReminderResponse;
}

pub mod delete_reminder {
    use super::*;

    pub type PathParams = ReminderPathParams;

    pub type APIResponse = ReminderResponse;
}
