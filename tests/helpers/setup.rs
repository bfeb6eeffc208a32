use nudge_api::Application;
use nudge_infra::{Config, IEmailProvider, InMemoryEmailProvider, NudgeContext};
use nudge_sdk::NudgeSDK;
use std::sync::Arc;

pub const ADMIN_EMAIL: &str = "admin@example.com";

pub struct TestApp {
    pub config: Config,
    pub address: String,
    /// Every email the application has sent
    pub email: Arc<InMemoryEmailProvider>,
}

impl TestApp {
    /// Client authenticated as the `User` with the given email
    pub fn sdk_for(&self, email: &str) -> NudgeSDK {
        let token = super::utils::create_session_token(email, &self.config.session_secret);
        NudgeSDK::new(self.address.clone(), token)
    }

    pub fn admin_sdk(&self) -> NudgeSDK {
        self.sdk_for(ADMIN_EMAIL)
    }

    pub fn cron_sdk(&self) -> NudgeSDK {
        NudgeSDK::with_cron_secret(self.address.clone(), self.config.cron_secret.clone())
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, NudgeSDK, String) {
    let email = Arc::new(InMemoryEmailProvider::new());
    let email_provider: Arc<dyn IEmailProvider> = email.clone();

    let mut ctx = NudgeContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.session_secret = "test-session-secret".into();
    ctx.config.cron_secret = "test-cron-secret".into();
    ctx.config.admin_emails = vec![ADMIN_EMAIL.into()];
    ctx.email = email_provider;

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp {
        config,
        address: address.clone(),
        email,
    };
    // Unauthenticated client
    let sdk = NudgeSDK::new(address.clone(), "");
    (app, sdk, address)
}
