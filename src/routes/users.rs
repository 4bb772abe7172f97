use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::hash_password;
use crate::error::AppError;
use crate::middleware::AuthenticatedUser;
use crate::store::{NewUser, Store, UserProfile};
use crate::validators::{is_valid_email, is_valid_password};

#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/users
///
/// # Errors
/// - 400: Invalid email or password
/// - 409: Email already registered
pub async fn create_user(
    form: web::Json<CredentialsRequest>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let email = is_valid_email(&form.email)?;
    is_valid_password(&form.password)?;
    let hashed_password = hash_password(&form.password)?;

    let user = store.create_user(NewUser { email, hashed_password }).await?;
    tracing::info!(user_id = %user.id, "User registered");

    Ok(HttpResponse::Created().json(UserProfile::from(user)))
}

/// PUT /api/users
///
/// Replace the caller's email and password.
///
/// # Errors
/// - 401: Missing or invalid access token
/// - 404: The token's user no longer exists
/// - 409: Email taken by another user
pub async fn update_user(
    caller: AuthenticatedUser,
    form: web::Json<CredentialsRequest>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let email = is_valid_email(&form.email)?;
    is_valid_password(&form.password)?;
    let hashed_password = hash_password(&form.password)?;

    let user = store
        .update_user(caller.user_id, &email, &hashed_password)
        .await?
        .ok_or(AppError::NotFound("user"))?;
    tracing::info!(user_id = %user.id, "User credentials updated");

    Ok(HttpResponse::Ok().json(UserProfile::from(user)))
}
