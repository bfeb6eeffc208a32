use chrono::{DateTime, TimeZone, Utc};
use nudge_infra::{IEmailProvider, ISys, InMemoryEmailProvider, NudgeContext};
use std::sync::Arc;

// Thu Mar 07 2024 12:00:00 UTC
const NOW_MILLIS: i64 = 1709812800000;

pub struct StaticTimeSys;
impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        NOW_MILLIS
    }
}

pub fn now() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(NOW_MILLIS).unwrap()
}

pub struct TestContext {
    pub ctx: NudgeContext,
    pub email: Arc<InMemoryEmailProvider>,
}

/// Inmemory context with a static clock and an email provider the test can inspect
pub fn setup() -> TestContext {
    let email = Arc::new(InMemoryEmailProvider::new());
    let email_provider: Arc<dyn IEmailProvider> = email.clone();
    let mut ctx = NudgeContext::create_inmemory();
    ctx.sys = Arc::new(StaticTimeSys);
    ctx.email = email_provider;

    TestContext { ctx, email }
}
