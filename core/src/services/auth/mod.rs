//! Authentication service module
//!
//! Sign-up with password hashing, credential checks at log-in and
//! resolving the user behind an access token.

mod password;
mod service;


pub use password::{hash_password, verify_password};
pub use service::{AuthService, Registration};
