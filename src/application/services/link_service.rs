//! Link creation and resolution service.

use std::sync::Arc;

use serde_json::json;
use tracing::warn;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, UserRepository};
use crate::error::AppError;
use crate::utils::key_generator::generate_short_key;

/// Service for creating and resolving shortened links.
///
/// Enforces the global one-short-link-per-URL rule and keeps short keys
/// collision-free via draw/check/retry.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    users: Arc<dyn UserRepository>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(links: Arc<dyn LinkRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { links, users }
    }

    /// Creates a short link owned by the user behind `email`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the email has no user record,
    /// [`AppError::Conflict`] if any existing link (regardless of owner)
    /// already shortens the same URL, or [`AppError::Internal`] when key
    /// generation exhausts its attempts.
    pub async fn create_link(
        &self,
        email: &str,
        title: String,
        url: String,
        description: Option<String>,
    ) -> Result<Link, AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "email": email })))?;

        if self.links.find_by_original(&url).await?.is_some() {
            return Err(AppError::conflict(
                "Link already exists",
                json!({ "url": url }),
            ));
        }

        let shortened = self.generate_unique_key().await?;

        let new_link = NewLink {
            user_id: user.id,
            title,
            description,
            original: url,
            shortened,
        };

        self.links.create(new_link).await
    }

    /// Resolves a short key to its link, counting the click.
    ///
    /// The increment targets exactly the row whose short key matched. A
    /// failed increment is logged and does not block the redirect.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has that key; nothing is
    /// mutated in that case.
    pub async fn resolve_link(&self, key: &str) -> Result<Link, AppError> {
        let link = self
            .links
            .find_by_key(key)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "key": key })))?;

        if let Err(e) = self.links.increment_clicks(key).await {
            warn!(key = %key, "click counter update failed: {e}");
        }

        Ok(link)
    }

    /// Draws short keys until one is unused, with a bounded attempt count.
    async fn generate_unique_key(&self) -> Result<String, AppError> {
        const MAX_ATTEMPTS: usize = 10;

        for _ in 0..MAX_ATTEMPTS {
            let key = generate_short_key();

            if self.links.find_by_key(&key).await?.is_none() {
                return Ok(key);
            }
        }

        Err(AppError::internal(
            "Failed to generate unique short key",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}
