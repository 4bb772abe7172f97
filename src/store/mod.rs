/// Persistent store
///
/// The auth core and the handlers only ever talk to [`Store`]. Production runs
/// on [`PgStore`]; [`MemoryStore`] backs the test suite and local experiments.

mod memory;
mod postgres;

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write
    #[error("duplicate {0}")]
    Conflict(String),
    /// A foreign key points at a row that does not exist
    #[error("missing {0}")]
    MissingReference(String),
    /// The store holds data it should not be able to hold
    #[error("integrity violation: {0}")]
    Integrity(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        // 23505 = unique_violation, 23503 = foreign_key_violation
        if let sqlx::Error::Database(db) = &err {
            match db.code().as_deref() {
                Some("23505") => return StoreError::Conflict(db.message().to_string()),
                Some("23503") => return StoreError::MissingReference(db.message().to_string()),
                _ => {}
            }
        }
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            other => StoreError::Database(other),
        }
    }
}

/// A registered user, including the password hash.
#[derive(Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub hashed_password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("hashed_password", &"[redacted]")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Public view of a user; what handlers are allowed to return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub hashed_password: String,
}

/// Stored state of a refresh token. Only the digest of the token is kept.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct RefreshTokenRecord {
    pub token_hash: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewRefreshToken {
    pub token_hash: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Chirp {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub user_id: Uuid,
}

#[async_trait]
pub trait Store: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Replaces email and password hash. `None` when no such user exists.
    async fn update_user(
        &self,
        id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> Result<Option<User>, StoreError>;

    /// Administrative bulk reset. Removes every user together with their
    /// refresh tokens and chirps and returns the number of users deleted.
    async fn delete_all_users(&self) -> Result<u64, StoreError>;

    /// Fails with [`StoreError::Conflict`] if the digest is already stored.
    async fn create_refresh_token(&self, token: NewRefreshToken) -> Result<(), StoreError>;

    async fn get_refresh_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshTokenRecord>, StoreError>;

    /// Marks the token revoked at `at` unless it already is. Returns `false`
    /// when no such token exists.
    async fn revoke_refresh_token(
        &self,
        token_hash: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, StoreError>;

    async fn create_chirp(&self, body: &str, user_id: Uuid) -> Result<Chirp, StoreError>;

    /// All chirps, oldest first
    async fn list_chirps(&self) -> Result<Vec<Chirp>, StoreError>;

    async fn get_chirp(&self, id: Uuid) -> Result<Option<Chirp>, StoreError>;

    /// Returns `false` when no such chirp exists.
    async fn delete_chirp(&self, id: Uuid) -> Result<bool, StoreError>;
}
