//! DTOs for the token endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to issue an API token for a verified account.
#[derive(Debug, Deserialize, Validate)]
pub struct IssueTokenRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

/// Response carrying the raw token value, returned exactly once.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
