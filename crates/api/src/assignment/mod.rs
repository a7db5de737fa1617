mod create_assignment;
mod delete_assignment;
mod get_course_assignments;
mod subscribers;

use actix_web::web;
use create_assignment::create_assignment_controller;
use delete_assignment::delete_assignment_controller;
use get_course_assignments::get_course_assignments_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/admin/assignment",
        web::post().to(create_assignment_controller),
    );
    cfg.route(
        "/admin/assignment/{assignment_id}",
        web::delete().to(delete_assignment_controller),
    );
    cfg.route(
        "/assignments/course/{course_id}",
        web::get().to(get_course_assignments_controller),
    );
}
