use crate::base::{APIResponse, BaseClient};
use chrono::{DateTime, Utc};
use nudge_api_structs::*;
use nudge_domain::ID;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub struct CreateReminderInput {
    pub company_id: String,
    pub company_name: String,
    pub company_user_id: Option<String>,
    pub days_between_reminders: i64,
    pub last_reminder_date: Option<DateTime<Utc>>,
}

pub struct UpdateReminderInput {
    pub reminder_id: ID,
    pub days_between_reminders: Option<i64>,
    pub company_user_id: Option<String>,
    pub last_reminder_date: Option<DateTime<Utc>>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateReminderInput,
    ) -> APIResponse<create_reminder::APIResponse> {
        let body = create_reminder::RequestBody {
            company_id: input.company_id,
            company_name: input.company_name,
            company_user_id: input.company_user_id,
            days_between_reminders: input.days_between_reminders,
            last_reminder_date: input.last_reminder_date,
        };

        self.base
            .post(body, "reminders".into(), StatusCode::CREATED)
            .await
    }

    pub async fn list(&self) -> APIResponse<get_reminders::APIResponse> {
        self.base.get("reminders".into(), StatusCode::OK).await
    }

    pub async fn update(
        &self,
        input: UpdateReminderInput,
    ) -> APIResponse<update_reminder::APIResponse> {
        let body = update_reminder::RequestBody {
            days_between_reminders: input.days_between_reminders,
            company_user_id: input.company_user_id,
            last_reminder_date: input.last_reminder_date,
        };

        self.base
            .put(
                body,
                format!("reminders/{}", input.reminder_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn reset(&self, reminder_id: &ID) -> APIResponse<reset_reminder::APIResponse> {
        self.base
            .post(
                (),
                format!("reminders/{}/reset", reminder_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn delete(&self, reminder_id: &ID) -> APIResponse<delete_reminder::APIResponse> {
        self.base
            .delete(format!("reminders/{}", reminder_id), StatusCode::OK)
            .await
    }
}
