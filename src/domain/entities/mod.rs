//! Core business entities.
//!
//! Plain data structures mapped straight from the relational store:
//!
//! - [`User`] - an account keyed by email, with its verification state
//! - [`Token`] - a per-user API credential
//! - [`Link`] - a shortened URL with its click counter

pub mod link;
pub mod token;
pub mod user;

pub use link::{Link, NewLink};
pub use token::Token;
pub use user::User;
