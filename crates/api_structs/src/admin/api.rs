use crate::dtos::{ReminderDTO, UserDTO, UserDueRemindersDTO};
use nudge_domain::ID;
use serde::{Deserialize, Serialize};

/// Summary of a batch of sent reminder emails
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemindersSentResponse {
    pub message: String,
    pub notified_users: usize,
}

impl RemindersSentResponse {
    pub fn new(notified_users: usize) -> Self {
        Self {
            message: format!("Reminders sent to {} users", notified_users),
            notified_users,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct UserPathParams {
    pub user_id: ID,
}

pub mod get_users {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub users: Vec<UserDTO>,
    }
}

pub mod get_user_reminders {
    use super::*;

    pub type PathParams = UserPathParams;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub user: UserDTO,
        pub reminders: Vec<ReminderDTO>,
    }
}

pub mod get_due_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub user_reminders: Vec<UserDueRemindersDTO>,
    }
}

pub mod send_reminder {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub recipient: String,
        pub reminder: ReminderDTO,
    }
}

pub mod send_user_due_reminders {
    use super::*;

    pub type PathParams = UserPathParams;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub recipient: String,
        pub count: usize,
    }
}

pub mod send_all_reminders {
    use super::*;

    pub type APIResponse = RemindersSentResponse;
}

pub mod send_test_email {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub email: String,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
    }
}
