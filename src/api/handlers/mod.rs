//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod health;
pub mod links;
pub mod redirect;
pub mod tokens;

pub use auth::{login_handler, logout_handler, signup_handler, verify_handler};
pub use health::health_handler;
pub use links::create_link_handler;
pub use redirect::redirect_handler;
pub use tokens::{issue_token_handler, revoke_token_handler};
