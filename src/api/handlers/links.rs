//! Handler for link creation.

use axum::{Json, extract::State};
use axum_extra::extract::CookieJar;
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, LinkResponse};
use crate::api::session;
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a URL for the authenticated user.
///
/// # Endpoint
///
/// `POST /links/link` (session cookies required)
///
/// # Errors
///
/// Returns 401 without a valid session (which also clears the target
/// user's pending code), 404 for unknown emails, 409 when the URL is
/// already shortened by anyone.
pub async fn create_link_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let (flag, signed) = session::halves(&jar);
    state
        .auth_service
        .authorize(flag.as_deref(), signed.as_deref(), Some(&payload.email))
        .await?;

    let CreateLinkRequest {
        email,
        title,
        url,
        description,
    } = payload;

    let link = state
        .link_service
        .create_link(&email, title, url, description)
        .await?;

    Ok(Json(LinkResponse {
        shortened: link.shortened,
    }))
}
