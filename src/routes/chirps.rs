use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::ensure_owner;
use crate::error::AppError;
use crate::middleware::AuthenticatedUser;
use crate::profanity::clean_chirp;
use crate::store::{Store, StoreError};
use crate::validators::is_valid_chirp;

#[derive(Deserialize)]
pub struct ChirpRequest {
    pub body: String,
}

/// POST /api/chirps
pub async fn create_chirp(
    caller: AuthenticatedUser,
    form: web::Json<ChirpRequest>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    is_valid_chirp(&form.body)?;

    // The access token can outlive its user
    let chirp = store
        .create_chirp(&clean_chirp(&form.body), caller.user_id)
        .await
        .map_err(|e| match e {
            StoreError::MissingReference(_) => AppError::NotFound("user"),
            other => other.into(),
        })?;
    tracing::info!(user_id = %caller.user_id, chirp_id = %chirp.id, "Chirp created");

    Ok(HttpResponse::Created().json(chirp))
}

/// GET /api/chirps
pub async fn list_chirps(store: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    let chirps = store.list_chirps().await?;
    Ok(HttpResponse::Ok().json(chirps))
}

/// GET /api/chirps/{chirp_id}
pub async fn get_chirp(
    path: web::Path<Uuid>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let chirp = store
        .get_chirp(path.into_inner())
        .await?
        .ok_or(AppError::NotFound("chirp"))?;

    Ok(HttpResponse::Ok().json(chirp))
}

/// DELETE /api/chirps/{chirp_id}
///
/// Only the author may delete a chirp.
///
/// # Errors
/// - 401: Missing or invalid access token
/// - 403: Caller is not the author
/// - 404: No such chirp
pub async fn delete_chirp(
    caller: AuthenticatedUser,
    path: web::Path<Uuid>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let chirp_id = path.into_inner();
    let chirp = store
        .get_chirp(chirp_id)
        .await?
        .ok_or(AppError::NotFound("chirp"))?;

    ensure_owner(chirp.user_id, caller.user_id)?;

    if !store.delete_chirp(chirp_id).await? {
        return Err(AppError::NotFound("chirp"));
    }
    tracing::info!(user_id = %caller.user_id, chirp_id = %chirp_id, "Chirp deleted");

    Ok(HttpResponse::NoContent().finish())
}
