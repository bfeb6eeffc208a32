use crate::base::{APIResponse, BaseClient};
use nudge_api_structs::send_reminders;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct CronClient {
    base: Arc<BaseClient>,
}

impl CronClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn send_reminders(&self) -> APIResponse<send_reminders::APIResponse> {
        self.base
            .get("cron/send-reminders".into(), StatusCode::OK)
            .await
    }
}
