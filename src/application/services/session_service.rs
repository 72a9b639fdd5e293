//! Session marker signing.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Fixed lifetime of the session cookie pair, in hours.
pub const SESSION_TTL_HOURS: i64 = 5;

/// Signs and verifies the session cookie payload.
///
/// The signed cookie carries `{payload}.{hex(hmac-sha256(payload))}` keyed
/// by the server-side cookie secret; a reader without the secret can neither
/// verify nor forge it. The service also carries the deployment-dependent
/// cookie settings (dev mode, domain) for the HTTP layer.
#[derive(Clone)]
pub struct SessionService {
    secret: String,
    dev_env: bool,
    cookie_domain: Option<String>,
}

impl SessionService {
    /// Creates a new session service.
    ///
    /// # Arguments
    ///
    /// - `secret` - HMAC key; must be stable across restarts or all
    ///   outstanding sessions are invalidated
    /// - `dev_env` - when true, cookies are host-only and not `Secure`
    /// - `cookie_domain` - cookie domain applied outside dev mode
    pub fn new(secret: String, dev_env: bool, cookie_domain: Option<String>) -> Self {
        Self {
            secret,
            dev_env,
            cookie_domain,
        }
    }

    /// Signs a payload into the session cookie value.
    pub fn sign(&self, payload: &str) -> String {
        format!("{payload}.{}", self.mac_hex(payload))
    }

    /// Verifies a signed cookie value and returns its payload.
    ///
    /// Returns `None` on any malformed value, bad hex, or signature
    /// mismatch; the comparison is constant-time via the HMAC verifier.
    pub fn verify(&self, signed: &str) -> Option<String> {
        let (payload, signature) = signed.rsplit_once('.')?;
        let signature = hex::decode(signature).ok()?;

        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).ok()?;

        Some(payload.to_string())
    }

    fn mac_hex(&self, payload: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    pub fn dev_env(&self) -> bool {
        self.dev_env
    }

    pub fn cookie_domain(&self) -> Option<&str> {
        self.cookie_domain.as_deref()
    }
}
