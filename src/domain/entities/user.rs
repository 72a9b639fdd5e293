//! User entity keyed by email.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// An account identified by its unique email address.
///
/// The `code` field doubles as the verification state: a non-null code means
/// a verification cycle is pending, null means the address is verified (or
/// never started a cycle).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Returns true while a verification code is outstanding.
    pub fn is_pending_verification(&self) -> bool {
        self.code.is_some()
    }
}
