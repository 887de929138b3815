//! MySQL implementation of the BookRepository trait.

use async_trait::async_trait;
use sqlx::{MySql, MySqlConnection, MySqlPool, QueryBuilder};

use sf_core::domain::entities::{Book, BookPatch, BookWithAuthors, NewBook};
use sf_core::errors::DomainError;
use sf_core::repositories::BookRepository;

use super::rows::{inserted_id, map_rows, row_to_author, row_to_book};
use crate::database::errors::db_err;

pub struct MySqlBookRepository {
    pool: MySqlPool,
}

impl MySqlBookRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

async fn select_book(
    conn: &mut MySqlConnection,
    id: i32,
) -> Result<Option<BookWithAuthors>, DomainError> {
    let row = sqlx::query("SELECT id, title, price_in_pln_gr FROM books WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(db_err("Failed to load book"))?;
    let book = match row {
        Some(row) => row_to_book(&row)?,
        None => return Ok(None),
    };

    let author_rows = sqlx::query(
        "SELECT a.id, a.name FROM authors a \
         JOIN book_authors ba ON ba.author_id = a.id \
         WHERE ba.book_id = ? ORDER BY a.id",
    )
    .bind(id)
    .fetch_all(conn)
    .await
    .map_err(db_err("Failed to load authors"))?;

    Ok(Some(BookWithAuthors {
        book,
        authors: map_rows(&author_rows, row_to_author)?,
    }))
}

/// Link authors to a book; an unknown author fails the foreign key
async fn link_authors(
    conn: &mut MySqlConnection,
    book_id: i32,
    author_ids: &[i32],
) -> Result<(), DomainError> {
    if author_ids.is_empty() {
        return Ok(());
    }
    let mut builder: QueryBuilder<'_, MySql> =
        QueryBuilder::new("INSERT INTO book_authors (book_id, author_id) ");
    builder.push_values(author_ids, |mut b, author_id| {
        b.push_bind(book_id).push_bind(*author_id);
    });
    builder.push(" ON DUPLICATE KEY UPDATE author_id = VALUES(author_id)");
    builder
        .build()
        .execute(conn)
        .await
        .map_err(db_err("Failed to link authors"))?;
    Ok(())
}

#[async_trait]
impl BookRepository for MySqlBookRepository {
    async fn find_all(&self) -> Result<Vec<Book>, DomainError> {
        let rows = sqlx::query("SELECT id, title, price_in_pln_gr FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err("Failed to list books"))?;
        map_rows(&rows, row_to_book)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<BookWithAuthors>, DomainError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(db_err("Failed to acquire connection"))?;
        select_book(&mut conn, id).await
    }

    async fn create(&self, book: NewBook) -> Result<BookWithAuthors, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let result = sqlx::query("INSERT INTO books (title, price_in_pln_gr) VALUES (?, ?)")
            .bind(&book.title)
            .bind(&book.price_in_pln_gr)
            .execute(&mut *tx)
            .await
            .map_err(db_err("Failed to create book"))?;
        let id = inserted_id(result.last_insert_id())?;
        link_authors(&mut tx, id, &book.author_ids).await?;

        let created = select_book(&mut tx, id)
            .await?
            .ok_or_else(|| DomainError::internal("Book vanished after insert"))?;
        tx.commit().await.map_err(db_err("Failed to commit transaction"))?;
        Ok(created)
    }

    async fn update(
        &self,
        id: i32,
        patch: BookPatch,
    ) -> Result<Option<BookWithAuthors>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let found: Option<i32> = sqlx::query_scalar("SELECT id FROM books WHERE id = ? FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err("Failed to load book"))?;
        if found.is_none() {
            return Ok(None);
        }

        if let Some(title) = &patch.title {
            sqlx::query("UPDATE books SET title = ? WHERE id = ?")
                .bind(title)
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(db_err("Failed to update book"))?;
        }
        if let Some(price) = &patch.price_in_pln_gr {
            sqlx::query("UPDATE books SET price_in_pln_gr = ? WHERE id = ?")
                .bind(price)
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(db_err("Failed to update book"))?;
        }
        if let Some(author_ids) = &patch.author_ids {
            sqlx::query("DELETE FROM book_authors WHERE book_id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(db_err("Failed to unlink authors"))?;
            link_authors(&mut tx, id, author_ids).await?;
        }

        let updated = select_book(&mut tx, id).await?;
        tx.commit().await.map_err(db_err("Failed to commit transaction"))?;
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err("Failed to delete book"))?;
        Ok(result.rows_affected() > 0)
    }
}
