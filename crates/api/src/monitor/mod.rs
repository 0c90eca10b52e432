use actix_web::web;

pub mod check_monitors;
mod create_monitor;
mod delete_monitor;
mod get_monitor;
mod get_monitor_logs;
mod get_monitors;
mod postpone_monitor;
mod update_monitor;

use check_monitors::{check_monitor_controller, check_monitors_controller};
use create_monitor::create_monitor_controller;
use delete_monitor::delete_monitor_controller;
use get_monitor::get_monitor_controller;
use get_monitor_logs::get_monitor_logs_controller;
use get_monitors::get_monitors_controller;
use postpone_monitor::postpone_monitor_controller;
use update_monitor::update_monitor_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/monitors", web::post().to(create_monitor_controller));
    cfg.route("/monitors", web::get().to(get_monitors_controller));

    // Registered before `/monitors/{monitor_id}` routes so `check` is not taken for an id
    cfg.route("/monitors/check", web::post().to(check_monitors_controller));

    cfg.route(
        "/monitors/{monitor_id}",
        web::get().to(get_monitor_controller),
    );
    cfg.route(
        "/monitors/{monitor_id}",
        web::put().to(update_monitor_controller),
    );
    cfg.route(
        "/monitors/{monitor_id}",
        web::delete().to(delete_monitor_controller),
    );

    cfg.route(
        "/monitors/{monitor_id}/postpone",
        web::post().to(postpone_monitor_controller),
    );
    cfg.route(
        "/monitors/{monitor_id}/check",
        web::post().to(check_monitor_controller),
    );
    cfg.route(
        "/monitors/{monitor_id}/logs",
        web::get().to(get_monitor_logs_controller),
    );
}
