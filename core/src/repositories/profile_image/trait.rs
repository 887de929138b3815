use async_trait::async_trait;

use crate::domain::entities::profile_image::ProfileImage;
use crate::errors::DomainError;

#[async_trait]
pub trait ProfileImageRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<ProfileImage>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<ProfileImage>, DomainError>;

    /// Create an image and attach it to `user_id`
    ///
    /// # Errors
    /// * `DomainError::Conflict` - The user already has a profile image
    /// * `DomainError::NotFound` - The user does not exist
    async fn create_for_user(&self, user_id: i32, url: &str) -> Result<ProfileImage, DomainError>;

    /// `Ok(None)` when the image does not exist
    async fn update(&self, id: i32, url: Option<&str>) -> Result<Option<ProfileImage>, DomainError>;

    /// Delete an image, detaching it from its user
    async fn delete(&self, id: i32) -> Result<bool, DomainError>;
}
