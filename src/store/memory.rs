use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{Chirp, NewRefreshToken, NewUser, RefreshTokenRecord, Store, StoreError, User};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    refresh_tokens: HashMap<String, RefreshTokenRecord>,
    chirps: Vec<Chirp>,
}

/// In-process [`Store`] guarded by a single mutex.
///
/// Enforces the same constraints as the Postgres schema: unique emails, unique
/// token digests, and cascading deletes from users.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables()?;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict("email".to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: user.email,
            hashed_password: user.hashed_password,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables()?;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn update_user(
        &self,
        id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> Result<Option<User>, StoreError> {
        let mut tables = self.tables()?;
        if tables.users.values().any(|u| u.email == email && u.id != id) {
            return Err(StoreError::Conflict("email".to_string()));
        }

        Ok(tables.users.get_mut(&id).map(|user| {
            user.email = email.to_string();
            user.hashed_password = hashed_password.to_string();
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn delete_all_users(&self) -> Result<u64, StoreError> {
        let mut tables = self.tables()?;
        let deleted = tables.users.len() as u64;
        tables.users.clear();
        tables.refresh_tokens.clear();
        tables.chirps.clear();
        Ok(deleted)
    }

    async fn create_refresh_token(&self, token: NewRefreshToken) -> Result<(), StoreError> {
        let mut tables = self.tables()?;
        if !tables.users.contains_key(&token.user_id) {
            return Err(StoreError::MissingReference(format!("user {}", token.user_id)));
        }
        if tables.refresh_tokens.contains_key(&token.token_hash) {
            return Err(StoreError::Conflict("refresh token".to_string()));
        }

        let now = Utc::now();
        tables.refresh_tokens.insert(
            token.token_hash.clone(),
            RefreshTokenRecord {
                token_hash: token.token_hash,
                user_id: token.user_id,
                created_at: now,
                updated_at: now,
                expires_at: token.expires_at,
                revoked_at: None,
            },
        );
        Ok(())
    }

    async fn get_refresh_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshTokenRecord>, StoreError> {
        let tables = self.tables()?;
        Ok(tables.refresh_tokens.get(token_hash).cloned())
    }

    async fn revoke_refresh_token(
        &self,
        token_hash: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let mut tables = self.tables()?;
        match tables.refresh_tokens.get_mut(token_hash) {
            None => Ok(false),
            Some(record) => {
                if record.revoked_at.is_none() {
                    record.revoked_at = Some(at);
                    record.updated_at = at;
                }
                Ok(true)
            }
        }
    }

    async fn create_chirp(&self, body: &str, user_id: Uuid) -> Result<Chirp, StoreError> {
        let mut tables = self.tables()?;
        if !tables.users.contains_key(&user_id) {
            return Err(StoreError::MissingReference(format!("user {}", user_id)));
        }

        let now = Utc::now();
        let chirp = Chirp {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            body: body.to_string(),
            user_id,
        };
        tables.chirps.push(chirp.clone());
        Ok(chirp)
    }

    async fn list_chirps(&self) -> Result<Vec<Chirp>, StoreError> {
        let tables = self.tables()?;
        // Insertion order is creation order.
        Ok(tables.chirps.clone())
    }

    async fn get_chirp(&self, id: Uuid) -> Result<Option<Chirp>, StoreError> {
        let tables = self.tables()?;
        Ok(tables.chirps.iter().find(|c| c.id == id).cloned())
    }

    async fn delete_chirp(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables()?;
        let before = tables.chirps.len();
        tables.chirps.retain(|c| c.id != id);
        Ok(tables.chirps.len() < before)
    }
}
