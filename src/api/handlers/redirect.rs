//! Handler for short link resolution.

use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short key to its original URL.
///
/// # Endpoint
///
/// `GET /links/{key}` (public)
///
/// Counts the click against exactly the resolved link, then answers
/// 307 Temporary Redirect.
///
/// # Errors
///
/// Returns 404 if the key is unknown; nothing is mutated in that case.
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let link = state.link_service.resolve_link(&key).await?;

    Ok(Redirect::temporary(&link.original))
}
