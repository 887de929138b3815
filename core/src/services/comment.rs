//! Comment service

use std::sync::Arc;

use crate::domain::entities::comment::Comment;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::CommentRepository;

const COMMENT_NOT_FOUND: &str = "Comment not found";

pub struct CommentService {
    repository: Arc<dyn CommentRepository>,
}

impl CommentService {
    pub fn new(repository: Arc<dyn CommentRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> DomainResult<Vec<Comment>> {
        self.repository.find_all().await
    }

    pub async fn get_by_id(&self, id: i32) -> DomainResult<Comment> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(COMMENT_NOT_FOUND))
    }

    /// Post a comment as `user_id`
    pub async fn create(&self, user_id: i32, text: &str) -> DomainResult<Comment> {
        self.repository.create(user_id, text).await
    }

    pub async fn update(&self, id: i32, text: Option<&str>) -> DomainResult<Comment> {
        self.repository
            .update(id, text)
            .await?
            .ok_or_else(|| DomainError::not_found(COMMENT_NOT_FOUND))
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        if !self.repository.delete(id).await? {
            return Err(DomainError::not_found(COMMENT_NOT_FOUND));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryStore;

    #[tokio::test]
    async fn test_comment_lifecycle() {
        let store = InMemoryStore::new();
        let author = store.seed_user("a@example.com", "A", "hash").await;
        let service = CommentService::new(Arc::new(store));

        let comment = service.create(author.id, "First!").await.unwrap();
        assert_eq!(comment.user_id, author.id);

        let edited = service.update(comment.id, Some("Second")).await.unwrap();
        assert_eq!(edited.text, "Second");

        service.delete(comment.id).await.unwrap();
        assert!(service.get_by_id(comment.id).await.unwrap_err().is_not_found());
        assert!(service.delete(comment.id).await.unwrap_err().is_not_found());
    }
}
