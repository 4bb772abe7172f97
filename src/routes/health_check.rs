use actix_web::{http::header::ContentType, HttpResponse};

/// GET /api/healthz
pub async fn health_check() -> HttpResponse {
    tracing::debug!("Readiness probe");
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body("OK")
}
