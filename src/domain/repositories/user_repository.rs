//! Repository trait for user accounts.

use crate::domain::entities::User;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user accounts and their verification codes.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Creates the user if absent, otherwise overwrites the pending code.
    ///
    /// Single conditional insert/update; either way the returned row carries
    /// the given code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn upsert_code(&self, email: &str, code: &str) -> Result<User, AppError>;

    /// Stores a new pending code for an existing user.
    ///
    /// Returns `Ok(false)` if no user has that email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn store_code(&self, email: &str, code: &str) -> Result<bool, AppError>;

    /// Clears any pending code for the email.
    ///
    /// A no-op for unknown emails; never fails on absence.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn clear_code(&self, email: &str) -> Result<(), AppError>;
}
