//! API token entity.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A long-lived API credential owned by exactly one user.
///
/// At most one token row exists per user; the raw value is returned to the
/// caller once at issuance and only ever travels in the signed session
/// cookie afterwards.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Token {
    pub id: i64,
    pub user_id: Uuid,
    pub token_val: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
