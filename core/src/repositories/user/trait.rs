//! User repository trait defining the interface for user data persistence.

use async_trait::async_trait;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Returned users carry their address when one is attached.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError>;

    /// Find a user by email (exact match)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Create a user, and its address when one is given, in one step
    ///
    /// # Errors
    /// * `DomainError::Conflict` - The email is already registered
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Replace the phone number; `Ok(None)` when the user does not exist
    async fn update_phone_number(
        &self,
        id: i32,
        phone_number: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Delete a user with their comments, atomically.
    ///
    /// Products are handed to `new_author` when given, otherwise deleted.
    ///
    /// # Returns
    /// * `Ok(false)` - The user does not exist
    ///
    /// # Errors
    /// * `DomainError::NotFound` - `new_author` does not exist; nothing is changed
    async fn delete_account(&self, id: i32, new_author: Option<i32>) -> Result<bool, DomainError>;
}
