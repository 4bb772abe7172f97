/// Authentication gateway
///
/// The single entry point handlers use for anything identity related: login,
/// access-token refresh, session revocation and bearer authentication.
///
/// Failure detail stops here. Callers see `InvalidCredentials`,
/// `RefreshTokenInvalid` or `InvalidToken`; the underlying reason is logged.

use std::sync::Arc;

use lazy_static::lazy_static;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::jwt::{access_token_ttl, make_access_token, validate_access_token};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::refresh_token::{RefreshTokenError, RefreshTokenStore};
use crate::configuration::JwtSettings;
use crate::error::{AppError, AuthError};
use crate::store::{Store, UserProfile};

const BEARER_PREFIX: &str = "Bearer ";

lazy_static! {
    // Verified against when the email is unknown, so that path costs one
    // bcrypt round like a real password check.
    static ref UNKNOWN_USER_DIGEST: Option<String> = hash_password("unknown-user").ok();
}

/// Result of a successful login
#[derive(Debug, Clone, Serialize)]
pub struct LoginSession {
    pub user: UserProfile,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone)]
pub struct AuthGateway {
    store: Arc<dyn Store>,
    refresh_tokens: RefreshTokenStore,
    jwt: JwtSettings,
}

impl AuthGateway {
    pub fn new(store: Arc<dyn Store>, jwt: JwtSettings) -> Self {
        // Pay for the dummy digest now, not on the first unknown-email login
        lazy_static::initialize(&UNKNOWN_USER_DIGEST);
        Self {
            refresh_tokens: RefreshTokenStore::new(store.clone()),
            store,
            jwt,
        }
    }

    /// Exchange email and password for an access/refresh token pair
    ///
    /// # Errors
    /// - `InvalidCredentials` for an unknown email or a wrong password alike
    /// - Storage and signing failures
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginSession, AppError> {
        let user = match self.store.find_user_by_email(email).await? {
            Some(user) => user,
            None => {
                if let Some(digest) = UNKNOWN_USER_DIGEST.as_deref() {
                    let _ = verify_password(password, digest);
                }
                tracing::info!("Login rejected: unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !verify_password(password, &user.hashed_password) {
            tracing::info!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        let access_token = self.issue_access_token(user.id)?;
        let refresh_token = self
            .refresh_tokens
            .issue(user.id)
            .await
            .map_err(|e| refresh_failure(e, "login"))?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(LoginSession {
            user: user.into(),
            access_token,
            refresh_token,
        })
    }

    /// Mint a new access token from a valid refresh token
    ///
    /// The refresh token itself is left untouched.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AppError> {
        let user_id = self
            .refresh_tokens
            .validate(refresh_token)
            .await
            .map_err(|e| refresh_failure(e, "refresh"))?;

        let access_token = self.issue_access_token(user_id)?;
        tracing::info!(user_id = %user_id, "Access token refreshed");
        Ok(access_token)
    }

    /// End the session a refresh token belongs to
    pub async fn revoke(&self, refresh_token: &str) -> Result<(), AppError> {
        self.refresh_tokens
            .revoke(refresh_token)
            .await
            .map_err(|e| refresh_failure(e, "revoke"))?;

        tracing::info!("Refresh token revoked");
        Ok(())
    }

    /// Resolve the value of an `Authorization` header to a user id
    ///
    /// # Errors
    /// - `MissingToken` if the header is absent or not a bearer token
    /// - `InvalidToken` if the access token does not validate
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<Uuid, AppError> {
        let token = bearer_token(authorization)?;

        validate_access_token(token, &self.jwt.secret).map_err(|e| {
            tracing::warn!(error = %e, "Access token rejected");
            AppError::Auth(AuthError::InvalidToken)
        })
    }

    fn issue_access_token(&self, user_id: Uuid) -> Result<String, AppError> {
        Ok(make_access_token(user_id, &self.jwt.secret, access_token_ttl())?)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value
pub fn bearer_token(authorization: Option<&str>) -> Result<&str, AuthError> {
    authorization
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)
}

/// Ownership check for user-owned resources
pub fn ensure_owner(owner: Uuid, caller: Uuid) -> Result<(), AuthError> {
    if owner == caller {
        Ok(())
    } else {
        tracing::warn!(owner = %owner, caller = %caller, "Ownership check failed");
        Err(AuthError::Forbidden)
    }
}

fn refresh_failure(err: RefreshTokenError, operation: &'static str) -> AppError {
    match err {
        RefreshTokenError::Storage(e) => AppError::Storage(e),
        reason => {
            tracing::warn!(operation = operation, reason = %reason, "Refresh token rejected");
            AppError::Auth(AuthError::RefreshTokenInvalid)
        }
    }
}
