//! PostgreSQL implementation of the token repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::Token;
use crate::domain::repositories::TokenRepository;
use crate::error::AppError;

/// PostgreSQL repository for API token storage.
pub struct PgTokenRepository {
    pool: Arc<PgPool>,
}

impl PgTokenRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenRepository for PgTokenRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Token>, AppError> {
        let token = sqlx::query_as::<_, Token>(
            r#"
            SELECT id, user_id, token_val, created_at, updated_at
            FROM tokens
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(token)
    }

    async fn find_by_value(&self, value: &str) -> Result<Option<Token>, AppError> {
        let token = sqlx::query_as::<_, Token>(
            r#"
            SELECT id, user_id, token_val, created_at, updated_at
            FROM tokens
            WHERE token_val = $1
            "#,
        )
        .bind(value)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(token)
    }

    async fn create(&self, user_id: Uuid, value: &str) -> Result<Token, AppError> {
        // The UNIQUE constraint on user_id turns a concurrent double-issue
        // into a Conflict instead of a second live token.
        let token = sqlx::query_as::<_, Token>(
            r#"
            INSERT INTO tokens (user_id, token_val)
            VALUES ($1, $2)
            RETURNING id, user_id, token_val, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(value)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(token)
    }

    async fn delete_by_value(&self, value: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM tokens
            WHERE token_val = $1
            "#,
        )
        .bind(value)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
