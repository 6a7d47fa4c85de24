use actix_web::{route, web, HttpResponse, Responder};
use serde_json::json;

use crate::config::Config;

/// Healthcheck endpoint
///
/// Reports the configured service name and version. Unauthenticated; for
/// HEAD the handler runs the same and actix strips the body on write.
#[route("/healthcheck", method = "GET", method = "HEAD")]
pub async fn healthcheck(config: web::Data<Config>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "OK",
        "title": config.project_name,
        "version": config.app_version,
        "message": "Service is up and running"
    }))
}
