use crate::{
    admin::send_all_reminders::SendAllRemindersUseCase,
    error::NudgeError,
    shared::{auth::protect_cron_route, usecase::execute},
};
use actix_web::{web, HttpRequest, HttpResponse};
use nudge_api_structs::send_reminders::*;
use nudge_infra::NudgeContext;

/// Entry point for an external scheduler, authenticated with the cron secret
async fn send_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<NudgeContext>,
) -> Result<HttpResponse, NudgeError> {
    protect_cron_route(&http_req, &ctx)?;

    execute(SendAllRemindersUseCase {}, &ctx)
        .await
        .map(|report| HttpResponse::Ok().json(APIResponse::new(report.notified_count())))
        .map_err(NudgeError::from)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/cron/send-reminders",
        web::get().to(send_reminders_controller),
    );
}
