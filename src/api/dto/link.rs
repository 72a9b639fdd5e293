//! DTOs for the link endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,

    /// The original URL to shorten (must be a valid HTTP/HTTPS URL).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    pub description: Option<String>,
}

/// Response carrying the generated short key.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub shortened: String,
}
