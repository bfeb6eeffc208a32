use crate::base::{APIResponse, BaseClient};
use nudge_api_structs::*;
use nudge_domain::ID;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct AdminClient {
    base: Arc<BaseClient>,
}

impl AdminClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn users(&self) -> APIResponse<get_users::APIResponse> {
        self.base.get("admin/users".into(), StatusCode::OK).await
    }

    pub async fn user_reminders(
        &self,
        user_id: &ID,
    ) -> APIResponse<get_user_reminders::APIResponse> {
        self.base
            .get(format!("admin/users/{}/reminders", user_id), StatusCode::OK)
            .await
    }

    pub async fn due_reminders(&self) -> APIResponse<get_due_reminders::APIResponse> {
        self.base
            .get("admin/reminders/due".into(), StatusCode::OK)
            .await
    }

    pub async fn send_reminder(
        &self,
        reminder_id: &ID,
    ) -> APIResponse<send_reminder::APIResponse> {
        self.base
            .post(
                (),
                format!("admin/reminders/{}/send", reminder_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn send_user_due_reminders(
        &self,
        user_id: &ID,
    ) -> APIResponse<send_user_due_reminders::APIResponse> {
        self.base
            .post(
                (),
                format!("admin/users/{}/send-due", user_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn send_all_reminders(&self) -> APIResponse<send_all_reminders::APIResponse> {
        self.base
            .post((), "admin/reminders/send-all".into(), StatusCode::OK)
            .await
    }

    pub async fn send_test_email(
        &self,
        email: String,
    ) -> APIResponse<send_test_email::APIResponse> {
        let body = send_test_email::RequestBody { email };
        self.base
            .post(body, "admin/test-email".into(), StatusCode::OK)
            .await
    }
}
