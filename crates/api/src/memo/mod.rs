use actix_web::web;

mod create_memo;
mod delete_memo;
mod get_memo;
mod get_memos;
mod postpone_memo;
pub mod send_memo_reminders;
mod subscribers;
mod update_memo;

use create_memo::create_memo_controller;
use delete_memo::delete_memo_controller;
use get_memo::get_memo_controller;
use get_memos::get_memos_controller;
use postpone_memo::postpone_memo_controller;
use update_memo::update_memo_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/memos", web::post().to(create_memo_controller));
    cfg.route("/memos", web::get().to(get_memos_controller));

    cfg.route("/memos/{memo_id}", web::get().to(get_memo_controller));
    cfg.route("/memos/{memo_id}", web::put().to(update_memo_controller));
    cfg.route("/memos/{memo_id}", web::delete().to(delete_memo_controller));

    cfg.route(
        "/memos/{memo_id}/postpone",
        web::post().to(postpone_memo_controller),
    );
}
