use crate::base::{APIResponse, BaseClient};
use nudge_api_structs::get_me;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct UserClient {
    base: Arc<BaseClient>,
}

impl UserClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn me(&self) -> APIResponse<get_me::APIResponse> {
        self.base.get("me".into(), StatusCode::OK).await
    }
}
