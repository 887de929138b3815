//! Profile image service

use std::sync::Arc;

use tracing::info;

use crate::domain::entities::profile_image::ProfileImage;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::ProfileImageRepository;

const IMAGE_NOT_FOUND: &str = "Profile image not found";
const IMAGE_EXISTS: &str = "User already has a profile image.";

pub struct ProfileImageService {
    repository: Arc<dyn ProfileImageRepository>,
}

impl ProfileImageService {
    pub fn new(repository: Arc<dyn ProfileImageRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> DomainResult<Vec<ProfileImage>> {
        self.repository.find_all().await
    }

    pub async fn get_by_id(&self, id: i32) -> DomainResult<ProfileImage> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(IMAGE_NOT_FOUND))
    }

    /// Attach a new image to `user_id`; a user holds at most one
    pub async fn create(&self, user_id: i32, url: &str) -> DomainResult<ProfileImage> {
        let image = self
            .repository
            .create_for_user(user_id, url)
            .await
            .map_err(|e| match e {
                DomainError::Conflict { .. } => DomainError::conflict(IMAGE_EXISTS),
                other => other,
            })?;
        info!(user_id, image_id = image.id, "Profile image attached");
        Ok(image)
    }

    pub async fn update(&self, id: i32, url: Option<&str>) -> DomainResult<ProfileImage> {
        self.repository
            .update(id, url)
            .await?
            .ok_or_else(|| DomainError::not_found(IMAGE_NOT_FOUND))
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        if !self.repository.delete(id).await? {
            return Err(DomainError::not_found(IMAGE_NOT_FOUND));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{InMemoryStore, UserRepository};

    #[tokio::test]
    async fn test_one_image_per_user() {
        let store = InMemoryStore::new();
        let user = store.seed_user("a@example.com", "A", "hash").await;
        let service = ProfileImageService::new(Arc::new(store.clone()));

        let image = service.create(user.id, "https://cdn.example.com/a.png").await.unwrap();
        let second = service.create(user.id, "https://cdn.example.com/b.png").await;

        assert_eq!(second.unwrap_err().to_string(), IMAGE_EXISTS);
        let owner = UserRepository::find_by_id(&store, user.id).await.unwrap().unwrap();
        assert_eq!(owner.profile_image_id, Some(image.id));
    }

    #[tokio::test]
    async fn test_delete_detaches_image() {
        let store = InMemoryStore::new();
        let user = store.seed_user("a@example.com", "A", "hash").await;
        let service = ProfileImageService::new(Arc::new(store.clone()));
        let image = service.create(user.id, "https://cdn.example.com/a.png").await.unwrap();

        service.delete(image.id).await.unwrap();

        let owner = UserRepository::find_by_id(&store, user.id).await.unwrap().unwrap();
        assert!(!owner.has_profile_image());
        assert!(service.get_by_id(image.id).await.unwrap_err().is_not_found());
    }
}
