//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for link storage and retrieval.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links (user_id, title, description, original, shortened)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, title, description, original, shortened,
                      clicks, created_at, updated_at
            "#,
        )
        .bind(new_link.user_id)
        .bind(&new_link.title)
        .bind(&new_link.description)
        .bind(&new_link.original)
        .bind(&new_link.shortened)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, user_id, title, description, original, shortened,
                   clicks, created_at, updated_at
            FROM links
            WHERE shortened = $1
            "#,
        )
        .bind(key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_by_original(&self, original: &str) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, user_id, title, description, original, shortened,
                   clicks, created_at, updated_at
            FROM links
            WHERE original = $1
            "#,
        )
        .bind(original)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn increment_clicks(&self, key: &str) -> Result<bool, AppError> {
        // Scoped to the matched row only.
        let result = sqlx::query(
            r#"
            UPDATE links
            SET clicks = clicks + 1, updated_at = NOW()
            WHERE shortened = $1
            "#,
        )
        .bind(key)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
