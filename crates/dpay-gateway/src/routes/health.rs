use actix_web::{web, HttpResponse};

/// GET /api/payment/health - liveness probe, always 200
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/payment/health", web::get().to(health));
}
