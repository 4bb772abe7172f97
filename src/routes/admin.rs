use actix_web::{http::header::ContentType, web, HttpResponse};

use crate::configuration::Platform;
use crate::error::{AppError, AuthError};
use crate::middleware::FileserverHits;
use crate::store::Store;

/// GET /admin/metrics
pub async fn metrics(hits: web::Data<FileserverHits>) -> HttpResponse {
    let page = format!(
        "<html>\n<body>\n<h1>Welcome, Chirpy Admin</h1>\n<p>Chirpy has been visited {} times!</p>\n</body>\n</html>",
        hits.get()
    );

    HttpResponse::Ok().content_type(ContentType::html()).body(page)
}

/// POST /admin/reset
///
/// Zeroes the hit counter and deletes every user (with their chirps and
/// sessions). Only reachable on the `dev` platform.
pub async fn reset(
    platform: web::Data<Platform>,
    hits: web::Data<FileserverHits>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    if !platform.allows_reset() {
        tracing::warn!(platform = ?platform.get_ref(), "Reset attempted outside dev");
        return Err(AuthError::Forbidden.into());
    }

    hits.reset();
    let deleted = store.delete_all_users().await?;
    tracing::warn!(deleted_users = deleted, "Store reset");

    Ok(HttpResponse::Ok().finish())
}
