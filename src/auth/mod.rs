//! Authentication against the storage API.
//!
//! The API hands out short-lived bearer tokens through `POST v3/auth/tokens`.
//! [`AuthToken`] knows its own expiry; the storage client caches one token
//! and re-authenticates synchronously when it lapses.

pub mod token;

pub use token::AuthToken;
