use async_trait::async_trait;

use crate::domain::entities::book::{Book, BookPatch, BookWithAuthors, NewBook};
use crate::errors::DomainError;

#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Book>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<BookWithAuthors>, DomainError>;

    /// # Errors
    /// * `DomainError::BadRequest` - One of the author ids does not exist
    async fn create(&self, book: NewBook) -> Result<BookWithAuthors, DomainError>;

    /// `Ok(None)` when the book does not exist
    ///
    /// # Errors
    /// * `DomainError::BadRequest` - One of the author ids does not exist
    async fn update(&self, id: i32, patch: BookPatch)
        -> Result<Option<BookWithAuthors>, DomainError>;

    async fn delete(&self, id: i32) -> Result<bool, DomainError>;
}
