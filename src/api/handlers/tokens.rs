//! Handlers for the token endpoints.

use axum::{Json, extract::State};
use axum_extra::extract::CookieJar;
use validator::Validate;

use crate::api::dto::auth::SuccessResponse;
use crate::api::dto::token::{IssueTokenRequest, TokenResponse};
use crate::api::session;
use crate::error::AppError;
use crate::state::AppState;

/// Issues the caller's API token.
///
/// # Endpoint
///
/// `POST /tokens/token` (session cookies required)
///
/// The raw token value is returned once in the body and signed into the
/// session cookie; there is no way to read it back later.
///
/// # Errors
///
/// Returns 401 without a valid session (which also clears the target
/// user's pending code), 404 for unknown emails, 409 when a token already
/// exists.
pub async fn issue_token_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<IssueTokenRequest>,
) -> Result<(CookieJar, Json<TokenResponse>), AppError> {
    payload.validate()?;

    let (flag, signed) = session::halves(&jar);
    state
        .auth_service
        .authorize(flag.as_deref(), signed.as_deref(), Some(&payload.email))
        .await?;

    let token = state.token_service.issue_token(&payload.email).await?;

    let jar = session::replace_signed(jar, &state.session, &token.token_val);

    Ok((jar, Json(TokenResponse {
        token: token.token_val,
    })))
}

/// Revokes the token carried by the session cookie.
///
/// # Endpoint
///
/// `DELETE /tokens/token` (session cookies required)
///
/// The signed cookie payload names the token to delete; possession of the
/// cookie is the ownership proof. The signed half is removed on success.
///
/// # Errors
///
/// Returns 401 without a valid session, 404 when no token matches the
/// cookie payload (e.g. none was ever issued).
pub async fn revoke_token_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<SuccessResponse>), AppError> {
    let (flag, signed) = session::halves(&jar);
    let payload = state
        .auth_service
        .authorize(flag.as_deref(), signed.as_deref(), None)
        .await?;

    state.token_service.revoke_token(&payload).await?;

    Ok((session::remove_signed(jar), Json(SuccessResponse::ok())))
}
