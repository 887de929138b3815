//! Book catalogue service

use std::sync::Arc;

use crate::domain::entities::book::{Book, BookPatch, BookWithAuthors, NewBook};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::BookRepository;

const BOOK_NOT_FOUND: &str = "Book not found";
const AUTHOR_NOT_FOUND: &str = "Author with provided id doesn't exist.";

/// Unknown author ids surface from the store as `BadRequest`
fn author_not_found(error: DomainError) -> DomainError {
    match error {
        DomainError::BadRequest { .. } => DomainError::not_found(AUTHOR_NOT_FOUND),
        other => other,
    }
}

pub struct BookService {
    repository: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> DomainResult<Vec<Book>> {
        self.repository.find_all().await
    }

    pub async fn get_by_id(&self, id: i32) -> DomainResult<BookWithAuthors> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(BOOK_NOT_FOUND))
    }

    pub async fn create(&self, book: NewBook) -> DomainResult<BookWithAuthors> {
        self.repository.create(book).await.map_err(author_not_found)
    }

    pub async fn update(&self, id: i32, patch: BookPatch) -> DomainResult<BookWithAuthors> {
        self.repository
            .update(id, patch)
            .await
            .map_err(author_not_found)?
            .ok_or_else(|| DomainError::not_found(BOOK_NOT_FOUND))
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        if !self.repository.delete(id).await? {
            return Err(DomainError::not_found(BOOK_NOT_FOUND));
        }
        Ok(())
    }
}
