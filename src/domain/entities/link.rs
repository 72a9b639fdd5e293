//! Short link entity.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A shortened URL owned by its creator.
///
/// `original` is unique across all links: a URL is shortened at most once,
/// globally. `clicks` counts successful resolutions.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub original: String,
    pub shortened: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub original: String,
    pub shortened: String,
}
