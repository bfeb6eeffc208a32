use crate::{admin::send_all_reminders::SendAllRemindersUseCase, shared::usecase::execute};
use actix_web::rt::time::{interval_at, Instant};
use nudge_infra::NudgeContext;
use std::time::Duration;
use tracing::info;

/// Seconds until the next multiple of `interval_secs` since the epoch, so that runs
/// happen at the same time of day no matter when the server was started
pub fn get_start_delay(now_ts: u64, interval_secs: u64) -> u64 {
    let interval_secs = interval_secs.max(1);
    interval_secs - (now_ts / 1000) % interval_secs
}

pub fn start_send_reminders_job(ctx: NudgeContext) {
    actix_web::rt::spawn(async move {
        let interval_secs = ctx.config.send_reminders_interval_secs.max(1);
        let now = ctx.sys.get_timestamp_millis().max(0) as u64;
        let secs_to_next_run = get_start_delay(now, interval_secs);
        info!(
            "Sending due reminders every {} seconds, first run in {} seconds",
            interval_secs, secs_to_next_run
        );

        let start = Instant::now() + Duration::from_secs(secs_to_next_run);
        let mut interval = interval_at(start, Duration::from_secs(interval_secs));
        loop {
            interval.tick().await;
            let context = ctx.clone();
            actix_web::rt::spawn(send_reminders(context));
        }
    });
}

async fn send_reminders(context: NudgeContext) {
    if let Ok(report) = execute(SendAllRemindersUseCase {}, &context).await {
        info!(
            "Scheduled run sent reminders to {} users",
            report.notified_count()
        );
    }
}
