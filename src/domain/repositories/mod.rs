//! Repository trait definitions for the domain layer.
//!
//! Traits define the data-access contract; concrete implementations live in
//! `crate::infrastructure::persistence`, and `mockall` mocks are generated
//! for unit tests.
//!
//! - [`UserRepository`] - accounts and verification codes
//! - [`TokenRepository`] - API token storage
//! - [`LinkRepository`] - short link CRUD and click counting

pub mod link_repository;
pub mod token_repository;
pub mod user_repository;

pub use link_repository::LinkRepository;
pub use token_repository::TokenRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
