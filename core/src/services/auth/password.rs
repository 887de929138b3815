//! Argon2id password hashing
//!
//! Hashing is CPU bound, so the async helpers move it onto the blocking pool.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use tracing::error;

use crate::errors::{AuthError, DomainError};

fn hash_blocking(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::HashingFailed)
}

fn verify_blocking(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Hash a plain-text password into a PHC string
pub async fn hash_password(password: &str) -> Result<String, DomainError> {
    let password = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash_blocking(&password))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {e}");
            DomainError::internal("password hashing task failed")
        })?;
    Ok(hashed?)
}

/// Check a plain-text password against a stored hash.
///
/// A malformed stored hash never matches.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, DomainError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || verify_blocking(&password, &hash))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {e}");
            DomainError::internal("password verification task failed")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hash = hash_password("correct horse").await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash).await.unwrap());
        assert!(!verify_password("wrong horse", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_salts_differ() {
        let first = hash_password("same-password").await.unwrap();
        let second = hash_password("same-password").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_malformed_hash_never_matches() {
        assert!(!verify_password("anything", "not-a-phc-string").await.unwrap());
    }
}
