/// JWT Claims structure
///
/// Registered claims (RFC 7519) carried by an access token. The subject is the
/// user id in its hyphenated string form.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::jwt::AccessTokenError;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Issuer
    pub iss: String,
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Claims issued now for `user_id`, expiring `ttl_seconds` later
    pub fn new(user_id: Uuid, ttl_seconds: i64, issuer: &str) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            iss: issuer.to_string(),
            sub: user_id.to_string(),
            iat: now,
            exp: now + ttl_seconds,
        }
    }

    /// Extract user ID from the subject
    ///
    /// # Errors
    /// Returns [`AccessTokenError::InvalidSubject`] if the subject is not a UUID
    pub fn user_id(&self) -> Result<Uuid, AccessTokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| AccessTokenError::InvalidSubject)
    }
}
