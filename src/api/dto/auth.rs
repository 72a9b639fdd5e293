//! DTOs for the authentication endpoints.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// Compiled regex for the 6-digit verification code.
static CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{6}$").unwrap());

/// Request carrying only an email (signup, login, logout).
#[derive(Debug, Deserialize, Validate)]
pub struct AuthRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

/// Request to redeem a verification code.
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    /// Exactly six decimal digits; leading zeros are significant.
    #[validate(regex(path = "*CODE_REGEX", message = "Code must be 6 digits"))]
    pub code: String,
}

/// Uniform `{success: true}` body for side-effect-only endpoints.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
