//! Repository trait for API tokens.

use crate::domain::entities::Token;
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for API token storage.
///
/// The one-token-per-user invariant is checked by the service and backed by
/// a UNIQUE constraint on `user_id`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTokenRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Finds the live token owned by a user, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Token>, AppError>;

    /// Finds a token by its raw value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_value(&self, value: &str) -> Result<Option<Token>, AppError>;

    /// Persists a new token for a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the user already has a token or the
    /// value collides. Returns [`AppError::Internal`] on database errors.
    async fn create(&self, user_id: Uuid, value: &str) -> Result<Token, AppError>;

    /// Deletes the token matching the raw value.
    ///
    /// Returns `Ok(false)` if no token matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete_by_value(&self, value: &str) -> Result<bool, AppError>;
}
