//! Passwordless authentication flow and session gate.

use std::sync::Arc;

use serde_json::json;
use tracing::{error, warn};

use crate::application::services::SessionService;
use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::infrastructure::email::EmailNotifier;
use crate::utils::key_generator::generate_verification_code;

/// The literal value the unsigned flag cookie must carry.
pub const AUTH_FLAG_VALUE: &str = "true";

/// Service for the email-code authentication lifecycle.
///
/// Drives the per-user state machine: no account → pending verification
/// (code set) → verified (code cleared, session marker issued) → back to
/// pending on the next signup. Also owns the session gate used by every
/// authenticated operation.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    notifier: Arc<dyn EmailNotifier>,
    session: SessionService,
}

impl AuthService {
    /// Creates a new authentication service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        notifier: Arc<dyn EmailNotifier>,
        session: SessionService,
    ) -> Self {
        Self {
            users,
            notifier,
            session,
        }
    }

    /// Starts (or restarts) a verification cycle for the email.
    ///
    /// Generates a fresh 6-digit code, emails it, then upserts the user row
    /// in one conditional insert/update. The email goes out before the row
    /// is written; if persistence then fails the recipient holds a code that
    /// was never stored, and the error is surfaced rather than masked.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if email delivery fails (provider
    /// detail is logged, not returned) or on database errors.
    pub async fn signup(&self, email: &str) -> Result<(), AppError> {
        let code = generate_verification_code();

        self.send_code(email, &code).await?;
        self.users.upsert_code(email, &code).await?;

        Ok(())
    }

    /// Issues a fresh code for an account with a pending verification cycle.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user has that email,
    /// [`AppError::Conflict`] if the account is already verified (no pending
    /// code), or [`AppError::Internal`] on delivery/database errors.
    pub async fn login(&self, email: &str) -> Result<(), AppError> {
        let user = self.get_user(email).await?;

        if !user.is_pending_verification() {
            return Err(AppError::conflict(
                "User already verified",
                json!({ "email": email }),
            ));
        }

        let code = generate_verification_code();
        self.users.store_code(email, &code).await?;
        self.send_code(email, &code).await?;

        Ok(())
    }

    /// Completes a verification cycle.
    ///
    /// Succeeds iff `code` exactly equals the stored non-null code; the
    /// match is case- and format-sensitive and a used code cannot be
    /// replayed, because success clears it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no user has that email, or
    /// [`AppError::Validation`] when the code does not match.
    pub async fn verify(&self, email: &str, code: &str) -> Result<User, AppError> {
        let user = self.get_user(email).await?;

        match user.code.as_deref() {
            Some(stored) if stored == code => {}
            _ => {
                return Err(AppError::bad_request(
                    "Invalid verification code",
                    json!({ "email": email }),
                ));
            }
        }

        self.users.clear_code(email).await?;

        Ok(user)
    }

    /// Ends any pending verification cycle for the email.
    ///
    /// Idempotent: succeeds for unknown emails and for users that never
    /// logged in. Cookie removal happens at the HTTP layer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn logout(&self, email: &str) -> Result<(), AppError> {
        self.users.clear_code(email).await
    }

    /// Authorization gate for authenticated operations.
    ///
    /// Passes iff the unsigned flag cookie equals the literal `true` AND the
    /// signed cookie verifies under the server secret; returns the signed
    /// payload (the verified email, or the raw token after issuance). On
    /// failure the gate invokes [`Self::defensive_reset`] for the target
    /// email when one is known, then fails closed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] when either cookie half is absent
    /// or invalid.
    pub async fn authorize(
        &self,
        flag: Option<&str>,
        signed: Option<&str>,
        email: Option<&str>,
    ) -> Result<String, AppError> {
        let flag_ok = flag == Some(AUTH_FLAG_VALUE);
        let payload = signed.and_then(|s| self.session.verify(s));

        if flag_ok && let Some(payload) = payload {
            return Ok(payload);
        }

        if let Some(email) = email {
            self.defensive_reset(email).await;
        }

        Err(AppError::unauthorized(
            "Unauthorized",
            json!({ "reason": "Missing or invalid session cookies" }),
        ))
    }

    /// Clears the target user's pending code after a denied request.
    ///
    /// A denied caller should not leave a live code behind that a later
    /// attacker could still redeem. Errors are logged and swallowed so the
    /// denial itself stays a clean 401.
    pub async fn defensive_reset(&self, email: &str) {
        if let Err(e) = self.users.clear_code(email).await {
            warn!(email = %email, "defensive reset failed: {e}");
        }
    }

    async fn get_user(&self, email: &str) -> Result<User, AppError> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "email": email })))
    }

    async fn send_code(&self, email: &str, code: &str) -> Result<(), AppError> {
        self.notifier
            .send_verification(email, code)
            .await
            .map_err(|e| {
                error!(email = %email, "verification email failed: {e}");
                AppError::internal("Error sending verification email", json!({}))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use crate::infrastructure::email::MockEmailNotifier;
    use chrono::Utc;
    use uuid::Uuid;

    fn test_session() -> SessionService {
        SessionService::new("test-cookie-secret".to_string(), true, None)
    }

    fn make_user(email: &str, code: Option<&str>) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            code: code.map(str::to_string),
            created_at: now,
            updated_at: now,
        }
    }

    fn service(users: MockUserRepository, notifier: MockEmailNotifier) -> AuthService {
        AuthService::new(Arc::new(users), Arc::new(notifier), test_session())
    }

    #[tokio::test]
    async fn test_signup_sends_then_persists() {
        let mut users = MockUserRepository::new();
        let mut notifier = MockEmailNotifier::new();

        notifier
            .expect_send_verification()
            .withf(|email, code| email == "a@x.com" && code.len() == 6)
            .times(1)
            .returning(|_, _| Ok(()));

        users
            .expect_upsert_code()
            .withf(|email, code| email == "a@x.com" && code.chars().all(|c| c.is_ascii_digit()))
            .times(1)
            .returning(|email, code| Ok(make_user(email, Some(code))));

        let result = service(users, notifier).signup("a@x.com").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_signup_email_failure_aborts_before_persisting() {
        let mut users = MockUserRepository::new();
        let mut notifier = MockEmailNotifier::new();

        notifier
            .expect_send_verification()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("provider exploded")));

        users.expect_upsert_code().times(0);

        let result = service(users, notifier).signup("a@x.com").await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
        // Provider detail is masked.
        assert!(!err.to_string().contains("provider exploded"));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(users, MockEmailNotifier::new()).login("a@x.com").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_login_already_verified() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .returning(|email| Ok(Some(make_user(email, None))));

        let result = service(users, MockEmailNotifier::new()).login("a@x.com").await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_login_pending_cycle_persists_then_sends() {
        let mut users = MockUserRepository::new();
        let mut notifier = MockEmailNotifier::new();

        users
            .expect_find_by_email()
            .times(1)
            .returning(|email| Ok(Some(make_user(email, Some("111111")))));
        users
            .expect_store_code()
            .withf(|_, code| code.len() == 6)
            .times(1)
            .returning(|_, _| Ok(true));
        notifier
            .expect_send_verification()
            .times(1)
            .returning(|_, _| Ok(()));

        let result = service(users, notifier).login("a@x.com").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_verify_success_clears_code() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .returning(|email| Ok(Some(make_user(email, Some("123456")))));
        users
            .expect_clear_code()
            .withf(|email| email == "a@x.com")
            .times(1)
            .returning(|_| Ok(()));

        let result = service(users, MockEmailNotifier::new())
            .verify("a@x.com", "123456")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_verify_wrong_code() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .returning(|email| Ok(Some(make_user(email, Some("123456")))));
        users.expect_clear_code().times(0);

        let result = service(users, MockEmailNotifier::new())
            .verify("a@x.com", "654321")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_verify_without_pending_code() {
        // A cleared code cannot be replayed.
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .times(1)
            .returning(|email| Ok(Some(make_user(email, None))));

        let result = service(users, MockEmailNotifier::new())
            .verify("a@x.com", "123456")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let mut users = MockUserRepository::new();
        users.expect_clear_code().times(1).returning(|_| Ok(()));

        let result = service(users, MockEmailNotifier::new()).logout("ghost@x.com").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_authorize_valid_session() {
        let users = MockUserRepository::new();
        let svc = service(users, MockEmailNotifier::new());
        let signed = test_session().sign("a@x.com");

        let payload = svc
            .authorize(Some("true"), Some(&signed), Some("a@x.com"))
            .await
            .unwrap();

        assert_eq!(payload, "a@x.com");
    }

    #[tokio::test]
    async fn test_authorize_missing_flag_triggers_defensive_reset() {
        let mut users = MockUserRepository::new();
        users
            .expect_clear_code()
            .withf(|email| email == "a@x.com")
            .times(1)
            .returning(|_| Ok(()));

        let svc = service(users, MockEmailNotifier::new());
        let signed = test_session().sign("a@x.com");

        let result = svc.authorize(None, Some(&signed), Some("a@x.com")).await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_authorize_bad_signature() {
        let mut users = MockUserRepository::new();
        users.expect_clear_code().times(1).returning(|_| Ok(()));

        let svc = service(users, MockEmailNotifier::new());

        let result = svc
            .authorize(Some("true"), Some("a@x.com.deadbeef"), Some("a@x.com"))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_authorize_without_email_skips_reset() {
        let mut users = MockUserRepository::new();
        users.expect_clear_code().times(0);

        let svc = service(users, MockEmailNotifier::new());

        let result = svc.authorize(None, None, None).await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_authorize_flag_must_be_literal_true() {
        let mut users = MockUserRepository::new();
        users.expect_clear_code().times(1).returning(|_| Ok(()));

        let svc = service(users, MockEmailNotifier::new());
        let signed = test_session().sign("a@x.com");

        let result = svc
            .authorize(Some("TRUE"), Some(&signed), Some("a@x.com"))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }
}
