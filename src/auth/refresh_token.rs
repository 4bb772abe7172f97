/// Refresh Token Management
///
/// Refresh tokens are:
/// - 32 random bytes, hex encoded (what the client holds)
/// - Stored only as their SHA-256 digest
/// - Valid for [`REFRESH_TOKEN_TTL_DAYS`] unless revoked first
/// - Looked up in the store on every use, so revocation is immediate

use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::{thread_rng, Rng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

use crate::store::{NewRefreshToken, Store, StoreError};

/// Refresh token lifetime
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 60;

const REFRESH_TOKEN_BYTES: usize = 32;

#[derive(Debug, Error)]
pub enum RefreshTokenError {
    #[error("refresh token not found")]
    NotFound,
    #[error("refresh token expired")]
    Expired,
    #[error("refresh token revoked")]
    Revoked,
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Generate a new cryptographically secure refresh token
pub fn generate_refresh_token() -> String {
    let bytes: [u8; REFRESH_TOKEN_BYTES] = thread_rng().gen();
    hex::encode(bytes)
}

/// SHA-256 hex digest of a token; the only form that reaches the store.
fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Issues, validates and revokes refresh tokens against a [`Store`].
#[derive(Clone)]
pub struct RefreshTokenStore {
    store: Arc<dyn Store>,
    ttl: Duration,
}

impl RefreshTokenStore {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            ttl: Duration::days(REFRESH_TOKEN_TTL_DAYS),
        }
    }

    /// Create and persist a refresh token for `user_id`
    ///
    /// # Errors
    /// Store failures. A digest collision is reported as
    /// [`StoreError::Integrity`] and is not retried.
    pub async fn issue(&self, user_id: Uuid) -> Result<String, RefreshTokenError> {
        let token = generate_refresh_token();
        let record = NewRefreshToken {
            token_hash: hash_token(&token),
            user_id,
            expires_at: Utc::now() + self.ttl,
        };

        self.store
            .create_refresh_token(record)
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => {
                    StoreError::Integrity("refresh token digest collision".to_string())
                }
                other => other,
            })?;

        tracing::debug!(user_id = %user_id, "Refresh token issued");
        Ok(token)
    }

    /// Resolve a refresh token to its user
    ///
    /// Checks, in order: the token exists, it has not expired, it has not been
    /// revoked.
    pub async fn validate(&self, token: &str) -> Result<Uuid, RefreshTokenError> {
        let record = self
            .store
            .get_refresh_token(&hash_token(token))
            .await?
            .ok_or(RefreshTokenError::NotFound)?;

        if record.expires_at < Utc::now() {
            return Err(RefreshTokenError::Expired);
        }
        if record.revoked_at.is_some() {
            return Err(RefreshTokenError::Revoked);
        }

        Ok(record.user_id)
    }

    /// Revoke a refresh token
    ///
    /// Revoking an already revoked token succeeds and keeps the original
    /// revocation time.
    pub async fn revoke(&self, token: &str) -> Result<(), RefreshTokenError> {
        let found = self
            .store
            .revoke_refresh_token(&hash_token(token), Utc::now())
            .await?;

        if !found {
            return Err(RefreshTokenError::NotFound);
        }
        Ok(())
    }
}
