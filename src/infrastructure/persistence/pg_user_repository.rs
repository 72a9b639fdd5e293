//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// PostgreSQL repository for user accounts.
pub struct PgUserRepository {
    pool: Arc<PgPool>,
}

impl PgUserRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, code, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    async fn upsert_code(&self, email: &str, code: &str) -> Result<User, AppError> {
        // Single conditional insert/update: creates the account on first
        // signup and restarts the verification cycle on every later one.
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, code)
            VALUES ($1, $2)
            ON CONFLICT (email)
            DO UPDATE SET code = EXCLUDED.code, updated_at = NOW()
            RETURNING id, email, code, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(code)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    async fn store_code(&self, email: &str, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET code = $2, updated_at = NOW()
            WHERE email = $1
            "#,
        )
        .bind(email)
        .bind(code)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear_code(&self, email: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE users
            SET code = NULL, updated_at = NOW()
            WHERE email = $1 AND code IS NOT NULL
            "#,
        )
        .bind(email)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
