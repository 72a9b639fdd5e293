//! Email delivery abstraction for verification codes.
//!
//! The service only ever needs one message shape: a verification code sent
//! to an address. Delivery itself (SMTP, provider API) stays behind the
//! [`EmailNotifier`] trait; the default [`LogEmailNotifier`] logs the code
//! and succeeds, which is what local development wants.

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

/// Email delivery contract: `send_verification(email, code)`.
///
/// Implementations decide the transport and return `Err` to abort the
/// enclosing auth flow.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailNotifier: Send + Sync {
    /// Delivers a verification code to an address, or fails.
    async fn send_verification(&self, email: &str, code: &str) -> Result<()>;
}

/// Local dev notifier that logs the code instead of sending real email.
#[derive(Clone, Debug, Default)]
pub struct LogEmailNotifier;

#[async_trait]
impl EmailNotifier for LogEmailNotifier {
    async fn send_verification(&self, email: &str, code: &str) -> Result<()> {
        info!(to_email = %email, code = %code, "verification email send stub");
        Ok(())
    }
}
