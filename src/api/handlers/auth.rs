//! Handlers for the authentication endpoints.

use axum::{Json, extract::State};
use axum_extra::extract::CookieJar;
use validator::Validate;

use crate::api::dto::auth::{AuthRequest, SuccessResponse, VerifyRequest};
use crate::api::session;
use crate::error::AppError;
use crate::state::AppState;

/// Starts (or restarts) a verification cycle.
///
/// # Endpoint
///
/// `POST /signup`
///
/// Idempotent upsert: an unknown email creates the account, a known one gets
/// a fresh code. The code is emailed before the row is written.
pub async fn signup_handler(
    State(state): State<AppState>,
    Json(payload): Json<AuthRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    payload.validate()?;

    state.auth_service.signup(&payload.email).await?;

    Ok(Json(SuccessResponse::ok()))
}

/// Re-issues a code for an account with a pending cycle.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Errors
///
/// Returns 404 for unknown emails and 409 when the account is already
/// verified (no code pending).
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<AuthRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    payload.validate()?;

    state.auth_service.login(&payload.email).await?;

    Ok(Json(SuccessResponse::ok()))
}

/// Redeems a verification code and establishes the session marker.
///
/// # Endpoint
///
/// `POST /verify`
///
/// On success both session cookies are set: the unsigned `authenticated`
/// flag and the signed `session_token` carrying the verified email.
///
/// # Errors
///
/// Returns 404 for unknown emails and 400 when the code does not match.
pub async fn verify_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<VerifyRequest>,
) -> Result<(CookieJar, Json<SuccessResponse>), AppError> {
    payload.validate()?;

    state
        .auth_service
        .verify(&payload.email, &payload.code)
        .await?;

    let jar = session::establish(jar, &state.session, &payload.email);

    Ok((jar, Json(SuccessResponse::ok())))
}

/// Ends the session: clears any pending code and removes both cookies.
///
/// # Endpoint
///
/// `POST /logout`
///
/// Always succeeds, even for emails that never signed up.
pub async fn logout_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<AuthRequest>,
) -> Result<(CookieJar, Json<SuccessResponse>), AppError> {
    payload.validate()?;

    state.auth_service.logout(&payload.email).await?;

    Ok((session::clear(jar), Json(SuccessResponse::ok())))
}
