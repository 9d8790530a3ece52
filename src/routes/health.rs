use crate::handlers::sessions::open_sessions;
use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;

#[get("/ping")]
async fn ping() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "pong", "sessions": open_sessions().await }))
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(ping);
}
