//! Token service module for JWT management
//!
//! Issues HS256 access tokens, verifies them and builds the
//! `Authentication` cookie headers used by login and logout.

mod service;

#[cfg(test)]
mod tests;

pub use service::TokenService;
