/// Authentication Routes
///
/// Login, access-token refresh and session revocation. Refresh and revoke take
/// the refresh token as a bearer token in the `Authorization` header.

use actix_web::{http::header, web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{bearer_token, AuthGateway};
use crate::error::AppError;

/// User login request
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Profile plus the freshly issued token pair
#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub token: String,
    pub refresh_token: String,
}

#[derive(Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /api/login
///
/// # Errors
/// - 401: Invalid credentials (unknown email and wrong password look the same)
/// - 500: Storage or signing failure
pub async fn login(
    form: web::Json<LoginRequest>,
    gateway: web::Data<AuthGateway>,
) -> Result<HttpResponse, AppError> {
    let session = gateway.login(form.email.trim(), &form.password).await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        id: session.user.id,
        created_at: session.user.created_at,
        updated_at: session.user.updated_at,
        email: session.user.email,
        token: session.access_token,
        refresh_token: session.refresh_token,
    }))
}

/// POST /api/refresh
///
/// Issues a new access token. The refresh token stays the same.
///
/// # Errors
/// - 401: Missing header, or the refresh token is unknown, expired or revoked
pub async fn refresh(
    req: HttpRequest,
    gateway: web::Data<AuthGateway>,
) -> Result<HttpResponse, AppError> {
    let refresh_token = bearer_token(authorization(&req))?;
    let token = gateway.refresh(refresh_token).await?;

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// POST /api/revoke
///
/// # Errors
/// - 401: Missing header or unknown refresh token
pub async fn revoke(
    req: HttpRequest,
    gateway: web::Data<AuthGateway>,
) -> Result<HttpResponse, AppError> {
    let refresh_token = bearer_token(authorization(&req))?;
    gateway.revoke(refresh_token).await?;

    Ok(HttpResponse::NoContent().finish())
}

fn authorization(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
}
