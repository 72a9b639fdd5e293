//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx with
//! runtime-bound parameters and `FromRow` entities.
//!
//! - [`PgUserRepository`] - accounts and verification codes
//! - [`PgTokenRepository`] - API token storage
//! - [`PgLinkRepository`] - short links and click counting

pub mod pg_link_repository;
pub mod pg_token_repository;
pub mod pg_user_repository;

pub use pg_link_repository::PgLinkRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_user_repository::PgUserRepository;
