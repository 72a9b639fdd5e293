//! Session cookie construction and extraction.
//!
//! The session marker is a cookie pair: an unsigned `authenticated` flag and
//! a signed `session_token` whose payload is the verified email until token
//! issuance replaces it with the raw API token. Both halves are `HttpOnly`,
//! `SameSite=Strict`, path-scoped to `/`, live for the fixed session TTL,
//! and are `Secure` with a configured domain outside dev mode.

use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use crate::application::services::auth_service::AUTH_FLAG_VALUE;
use crate::application::services::{SESSION_TTL_HOURS, SessionService};

/// Name of the unsigned flag cookie.
pub const AUTH_FLAG_COOKIE: &str = "authenticated";

/// Name of the signed cookie.
pub const SESSION_TOKEN_COOKIE: &str = "session_token";

/// Sets both session marker halves after a successful verification.
pub fn establish(jar: CookieJar, session: &SessionService, payload: &str) -> CookieJar {
    jar.add(build_cookie(
        session,
        AUTH_FLAG_COOKIE,
        AUTH_FLAG_VALUE.to_string(),
    ))
    .add(build_cookie(
        session,
        SESSION_TOKEN_COOKIE,
        session.sign(payload),
    ))
}

/// Re-signs only the signed half with a new payload (token issuance).
pub fn replace_signed(jar: CookieJar, session: &SessionService, payload: &str) -> CookieJar {
    jar.add(build_cookie(
        session,
        SESSION_TOKEN_COOKIE,
        session.sign(payload),
    ))
}

/// Removes both halves (logout).
pub fn clear(jar: CookieJar) -> CookieJar {
    jar.remove(removal(AUTH_FLAG_COOKIE))
        .remove(removal(SESSION_TOKEN_COOKIE))
}

/// Removes only the signed half (token revocation).
pub fn remove_signed(jar: CookieJar) -> CookieJar {
    jar.remove(removal(SESSION_TOKEN_COOKIE))
}

/// Extracts both cookie halves for the authorization gate.
pub fn halves(jar: &CookieJar) -> (Option<String>, Option<String>) {
    (
        jar.get(AUTH_FLAG_COOKIE).map(|c| c.value().to_string()),
        jar.get(SESSION_TOKEN_COOKIE).map(|c| c.value().to_string()),
    )
}

fn build_cookie(session: &SessionService, name: &'static str, value: String) -> Cookie<'static> {
    let mut builder = Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(!session.dev_env())
        .same_site(SameSite::Strict)
        .max_age(Duration::hours(SESSION_TTL_HOURS));

    if !session.dev_env()
        && let Some(domain) = session.cookie_domain()
    {
        builder = builder.domain(domain.to_string());
    }

    builder.build()
}

fn removal(name: &'static str) -> Cookie<'static> {
    // Path must match the original cookie for removal to take effect.
    Cookie::build((name, "")).path("/").build()
}
