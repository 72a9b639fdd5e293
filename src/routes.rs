//! Router configuration.
//!
//! # Route Structure
//!
//! - `POST /signup`, `/login`, `/verify`, `/logout` - auth flow (public)
//! - `POST /tokens/token`, `DELETE /tokens/token`   - token flow (session cookies)
//! - `POST /links/link`                             - link creation (session cookies)
//! - `GET  /links/{key}`                            - short link redirect (public)
//! - `GET  /health`                                 - health check (public)
//!
//! The session gate runs inside the handlers (it needs the request email
//! for the defensive reset on denial), so no route-level auth layer exists.

use axum::{
    Router,
    routing::{get, post},
};
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api::handlers::{
    create_link_handler, health_handler, issue_token_handler, login_handler, logout_handler,
    redirect_handler, revoke_token_handler, signup_handler, verify_handler,
};
use crate::api::middleware::tracing;
use crate::state::AppState;

/// Constructs the application router without the outer path normalization.
///
/// Exposed separately so integration tests can drive it directly.
pub fn router(state: AppState) -> Router {
    let token_routes = Router::new().route(
        "/token",
        post(issue_token_handler).delete(revoke_token_handler),
    );

    let link_routes = Router::new()
        .route("/link", post(create_link_handler))
        .route("/{key}", get(redirect_handler));

    Router::new()
        .route("/signup", post(signup_handler))
        .route("/login", post(login_handler))
        .route("/verify", post(verify_handler))
        .route("/logout", post(logout_handler))
        .route("/health", get(health_handler))
        .nest("/tokens", token_routes)
        .nest("/links", link_routes)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(tracing::layer())
}

/// Constructs the full application router with all middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
