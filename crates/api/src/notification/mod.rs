mod get_notifications;
mod mark_notification_read;
pub mod notify_new_assignment;
pub mod send_unsent_notifications;

use actix_web::web;
use get_notifications::get_notifications_controller;
use mark_notification_read::mark_notification_read_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/notifications/{student_id}",
        web::get().to(get_notifications_controller),
    );
    cfg.route(
        "/notifications/read/{notification_id}",
        web::put().to(mark_notification_read_controller),
    );
}
