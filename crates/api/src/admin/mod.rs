mod get_due_reminders;
mod get_user_reminders;
mod get_users;
mod send_reminder;
pub mod send_all_reminders;
mod send_test_email;
mod send_user_due_reminders;

use actix_web::web;
use get_due_reminders::get_due_reminders_controller;
use get_user_reminders::get_user_reminders_controller;
use get_users::get_users_controller;
use send_all_reminders::send_all_reminders_controller;
use send_reminder::send_reminder_controller;
use send_test_email::send_test_email_controller;
use send_user_due_reminders::send_user_due_reminders_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/admin/users", web::get().to(get_users_controller));
    cfg.route(
        "/admin/users/{user_id}/reminders",
        web::get().to(get_user_reminders_controller),
    );
    cfg.route(
        "/admin/users/{user_id}/send-due",
        web::post().to(send_user_due_reminders_controller),
    );
    cfg.route(
        "/admin/reminders/due",
        web::get().to(get_due_reminders_controller),
    );
    cfg.route(
        "/admin/reminders/send-all",
        web::post().to(send_all_reminders_controller),
    );
    cfg.route(
        "/admin/reminders/{reminder_id}/send",
        web::post().to(send_reminder_controller),
    );
    cfg.route(
        "/admin/test-email",
        web::post().to(send_test_email_controller),
    );
}
