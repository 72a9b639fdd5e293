//! Business logic services for the application layer.

pub mod auth_service;
pub mod link_service;
pub mod session_service;
pub mod token_service;

pub use auth_service::AuthService;
pub use link_service::LinkService;
pub use session_service::{SESSION_TTL_HOURS, SessionService};
pub use token_service::TokenService;
