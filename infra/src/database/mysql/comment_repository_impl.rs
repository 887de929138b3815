//! MySQL implementation of the CommentRepository trait.

use async_trait::async_trait;
use sqlx::MySqlPool;

use sf_core::domain::entities::Comment;
use sf_core::errors::DomainError;
use sf_core::repositories::CommentRepository;

use super::rows::{inserted_id, map_rows, row_to_comment};
use crate::database::errors::db_err;

pub struct MySqlCommentRepository {
    pool: MySqlPool,
}

impl MySqlCommentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for MySqlCommentRepository {
    async fn find_all(&self) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query("SELECT id, text, user_id FROM comments ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err("Failed to list comments"))?;
        map_rows(&rows, row_to_comment)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Comment>, DomainError> {
        let row = sqlx::query("SELECT id, text, user_id FROM comments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("Failed to load comment"))?;
        row.as_ref().map(row_to_comment).transpose()
    }

    async fn create(&self, user_id: i32, text: &str) -> Result<Comment, DomainError> {
        let result = sqlx::query("INSERT INTO comments (text, user_id) VALUES (?, ?)")
            .bind(text)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(db_err("Failed to create comment"))?;

        Ok(Comment {
            id: inserted_id(result.last_insert_id())?,
            text: text.to_string(),
            user_id,
        })
    }

    async fn update(&self, id: i32, text: Option<&str>) -> Result<Option<Comment>, DomainError> {
        if let Some(text) = text {
            sqlx::query("UPDATE comments SET text = ? WHERE id = ?")
                .bind(text)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(db_err("Failed to update comment"))?;
        }
        self.find_by_id(id).await
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err("Failed to delete comment"))?;
        Ok(result.rows_affected() > 0)
    }
}
