mod admin;
mod base;
mod cron;
mod reminder;
mod status;
mod user;

use admin::AdminClient;
pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
use cron::CronClient;
pub use nudge_api_structs::dtos::*;
pub use nudge_domain::{DueState, DUE_REMINDERS_SUBJECT, ID};
use reminder::ReminderClient;
pub use reminder::{CreateReminderInput, UpdateReminderInput};
pub use reqwest::StatusCode;
use status::StatusClient;
use std::sync::Arc;
use user::UserClient;

// Domain
pub use nudge_api_structs::dtos::ReminderDTO as Reminder;
pub use nudge_api_structs::dtos::UserDTO as User;
pub use nudge_api_structs::dtos::UserDueRemindersDTO as UserDueReminders;

/// Nudge Server SDK
///
/// The SDK contains methods for interacting with the Nudge server
/// API.
#[derive(Clone)]
pub struct NudgeSDK {
    pub admin: AdminClient,
    pub cron: CronClient,
    pub reminder: ReminderClient,
    pub status: StatusClient,
    pub user: UserClient,
}

impl NudgeSDK {
    /// Client acting on behalf of the `User` the session token was issued for
    pub fn new<T: Into<String>>(address: String, session_token: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_session_token(session_token.into());
        Self::from_base(base)
    }

    /// Client for the scheduled job runner
    pub fn with_cron_secret<T: Into<String>>(address: String, cron_secret: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_cron_secret(cron_secret.into());
        Self::from_base(base)
    }

    fn from_base(base: BaseClient) -> Self {
        let base = Arc::new(base);
        let admin = AdminClient::new(base.clone());
        let cron = CronClient::new(base.clone());
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base.clone());
        let user = UserClient::new(base);

        Self {
            admin,
            cron,
            reminder,
            status,
            user,
        }
    }
}
