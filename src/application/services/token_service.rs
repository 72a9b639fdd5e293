//! API token issuance and revocation.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::Token;
use crate::domain::repositories::{TokenRepository, UserRepository};
use crate::error::AppError;
use crate::utils::key_generator::generate_api_key;

/// Service for the per-user API token lifecycle.
///
/// Enforces at most one live token per user and hands the raw value out
/// exactly once; afterwards it only travels inside the signed session
/// cookie.
pub struct TokenService {
    tokens: Arc<dyn TokenRepository>,
    users: Arc<dyn UserRepository>,
}

impl TokenService {
    /// Creates a new token service.
    pub fn new(tokens: Arc<dyn TokenRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { tokens, users }
    }

    /// Issues a token for a verified user.
    ///
    /// Draws a 32-character alphanumeric key, checks it against the store,
    /// and retries on collision up to a bounded attempt count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the email has no user record,
    /// [`AppError::Conflict`] if the user already holds a token, or
    /// [`AppError::Internal`] when the key space yields nothing but
    /// collisions.
    pub async fn issue_token(&self, email: &str) -> Result<Token, AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "email": email })))?;

        if self.tokens.find_by_user(user.id).await?.is_some() {
            return Err(AppError::conflict(
                "Token already exists for this user",
                json!({ "email": email }),
            ));
        }

        let value = self.generate_unique_key().await?;

        self.tokens.create(user.id, &value).await
    }

    /// Revokes the token matching the raw value.
    ///
    /// The value always comes from the caller's own signed session cookie,
    /// so possession of the cookie is the ownership proof.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no token matches the value.
    pub async fn revoke_token(&self, value: &str) -> Result<(), AppError> {
        let deleted = self.tokens.delete_by_value(value).await?;

        if !deleted {
            return Err(AppError::not_found("No token found", json!({})));
        }

        Ok(())
    }

    /// Draws API keys until one is unused, with a bounded attempt count.
    async fn generate_unique_key(&self) -> Result<String, AppError> {
        const MAX_ATTEMPTS: usize = 10;

        for _ in 0..MAX_ATTEMPTS {
            let value = generate_api_key();

            if self.tokens.find_by_value(&value).await?.is_none() {
                return Ok(value);
            }
        }

        Err(AppError::internal(
            "Failed to generate unique token",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}
