use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{AuthToken, NewUser, StoreError, User, UserStore};

/// In-memory store with the same semantics as [`super::PgStore`], used by
/// the integration suite so the user API can be exercised without Postgres.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<String, User>,
    tokens: HashMap<Uuid, AuthToken>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.users.contains_key(&new.email) {
            return Err(StoreError::DuplicateEmail);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: new.email.clone(),
            password_hash: new.password_hash,
            name: new.name,
            is_active: false,
            is_staff: false,
            created_at: OffsetDateTime::now_utc(),
        };
        inner.users.insert(new.email, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.get(email).cloned())
    }

    async fn get_or_create_token(
        &self,
        user_id: Uuid,
        candidate_key: &str,
    ) -> Result<AuthToken, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let token = inner.tokens.entry(user_id).or_insert_with(|| AuthToken {
            key: candidate_key.to_string(),
            user_id,
            created_at: OffsetDateTime::now_utc(),
        });
        Ok(token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.into(),
            password_hash: "$argon2id$fake".into(),
            name: None,
        }
    }

    #[tokio::test]
    async fn create_user_rejects_duplicate_email() {
        let store = MemoryStore::new();
        store.create_user(new_user("a@example.com")).await.unwrap();
        let err = store.create_user(new_user("a@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
    }

    #[tokio::test]
    async fn get_or_create_token_reuses_existing_key() {
        let store = MemoryStore::new();
        let user = store.create_user(new_user("a@example.com")).await.unwrap();
        let first = store.get_or_create_token(user.id, "key-one").await.unwrap();
        let second = store.get_or_create_token(user.id, "key-two").await.unwrap();
        assert_eq!(first.key, "key-one");
        assert_eq!(second.key, "key-one");
    }

    #[tokio::test]
    async fn tokens_are_scoped_per_user() {
        let store = MemoryStore::new();
        let a = store.create_user(new_user("a@example.com")).await.unwrap();
        let b = store.create_user(new_user("b@example.com")).await.unwrap();
        let ta = store.get_or_create_token(a.id, "key-a").await.unwrap();
        let tb = store.get_or_create_token(b.id, "key-b").await.unwrap();
        assert_ne!(ta.key, tb.key);
    }
}
