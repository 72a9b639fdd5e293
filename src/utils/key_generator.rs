//! Random key and code generation.
//!
//! All generators draw independently of stored state; collision avoidance is
//! the caller's responsibility (see the retry loops in the services).

use rand::Rng;
use rand::distr::{Alphanumeric, SampleString};

/// Digits in a verification code.
pub const VERIFICATION_CODE_LENGTH: usize = 6;

/// Characters in an API token.
pub const API_KEY_LENGTH: usize = 32;

/// Characters in a short link key.
pub const SHORT_KEY_LENGTH: usize = 8;

/// Generates a 6-digit numeric verification code.
///
/// Each digit is drawn independently, so leading zeros are possible and the
/// code must be treated as a string throughout.
pub fn generate_verification_code() -> String {
    let mut rng = rand::rng();
    (0..VERIFICATION_CODE_LENGTH)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// Generates a 32-character alphanumeric API key.
pub fn generate_api_key() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), API_KEY_LENGTH)
}

/// Generates an 8-character alphanumeric short link key.
pub fn generate_short_key() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), SHORT_KEY_LENGTH)
}
