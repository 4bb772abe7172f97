/// JWT Token Generation and Validation
///
/// Access tokens are HS256-signed JWTs. They are verified purely from the
/// signature and the registered claims, with no store lookup.

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::claims::Claims;

/// `iss` claim of every access token this service issues
pub const TOKEN_ISSUER: &str = "chirpy-access";

/// Access token lifetime: one hour
pub const ACCESS_TOKEN_TTL_SECS: i64 = 60 * 60;

pub fn access_token_ttl() -> Duration {
    Duration::seconds(ACCESS_TOKEN_TTL_SECS)
}

#[derive(Debug, Error)]
pub enum AccessTokenError {
    /// Malformed, badly signed or expired
    #[error("invalid access token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
    #[error("access token issuer mismatch")]
    InvalidIssuer,
    #[error("access token subject is not a user id")]
    InvalidSubject,
    #[error("access token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Generate a new access token for a user
///
/// # Arguments
/// * `user_id` - User's UUID, becomes the `sub` claim
/// * `secret` - HMAC signing secret
/// * `ttl` - Time until the token expires
///
/// # Errors
/// Returns [`AccessTokenError::Signing`] if encoding fails
pub fn make_access_token(
    user_id: Uuid,
    secret: &str,
    ttl: Duration,
) -> Result<String, AccessTokenError> {
    let claims = Claims::new(user_id, ttl.num_seconds(), TOKEN_ISSUER);

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(AccessTokenError::Signing)
}

/// Validate an access token and return the user it was issued for
///
/// # Errors
/// - [`AccessTokenError::Invalid`] for bad signature, wrong algorithm, malformed
///   input or expiry
/// - [`AccessTokenError::InvalidIssuer`] if `iss` is not [`TOKEN_ISSUER`]
/// - [`AccessTokenError::InvalidSubject`] if `sub` is not a UUID
pub fn validate_access_token(token: &str, secret: &str) -> Result<Uuid, AccessTokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_issuer(&[TOKEN_ISSUER]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidIssuer => AccessTokenError::InvalidIssuer,
        _ => AccessTokenError::Invalid(e),
    })?;

    data.claims.user_id()
}
