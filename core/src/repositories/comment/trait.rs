use async_trait::async_trait;

use crate::domain::entities::comment::Comment;
use crate::errors::DomainError;

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Comment>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Comment>, DomainError>;

    async fn create(&self, user_id: i32, text: &str) -> Result<Comment, DomainError>;

    /// `Ok(None)` when the comment does not exist
    async fn update(&self, id: i32, text: Option<&str>) -> Result<Option<Comment>, DomainError>;

    async fn delete(&self, id: i32) -> Result<bool, DomainError>;
}
