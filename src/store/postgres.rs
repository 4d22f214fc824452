use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{AuthToken, NewUser, StoreError, User, UserStore};

/// Production store backed by Postgres. Uniqueness is enforced by the
/// database constraints on `users.email` and `auth_tokens.user_id`, never
/// by a lookup-then-insert in application code.
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, name)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, name, is_active, is_staff, created_at
            "#,
        )
        .bind(&new.email)
        .bind(&new.password_hash)
        .bind(&new.name)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return StoreError::DuplicateEmail;
                }
            }
            StoreError::Database(e)
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name, is_active, is_staff, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn get_or_create_token(
        &self,
        user_id: Uuid,
        candidate_key: &str,
    ) -> Result<AuthToken, StoreError> {
        // No-op upsert on the user_id unique constraint: the loser of a
        // concurrent insert reads back the winner's existing row.
        let token = sqlx::query_as::<_, AuthToken>(
            r#"
            INSERT INTO auth_tokens (key, user_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET user_id = auth_tokens.user_id
            RETURNING key, user_id, created_at
            "#,
        )
        .bind(candidate_key)
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;
        Ok(token)
    }
}
