use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// User record as persisted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2 hash, never exposed in JSON
    pub name: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
    pub created_at: OffsetDateTime,
}

/// Opaque bearer token, at most one per user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuthToken {
    pub key: String,
    pub user_id: Uuid,
    pub created_at: OffsetDateTime,
}

/// Input for creating a user. The password arrives here already hashed;
/// the store never sees plaintext credentials.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Account and token persistence behind one seam so handlers stay
/// backend-agnostic and the HTTP surface can be tested in-process.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user. Duplicate emails must surface as
    /// [`StoreError::DuplicateEmail`] with nothing written.
    async fn create_user(&self, new: NewUser) -> Result<User, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Return the user's token, creating it with `candidate_key` only if
    /// none exists yet. Atomic: a race between two callers resolves to a
    /// single surviving token that both observe.
    async fn get_or_create_token(
        &self,
        user_id: Uuid,
        candidate_key: &str,
    ) -> Result<AuthToken, StoreError>;
}
