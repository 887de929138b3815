//! MySQL implementation of the ProfileImageRepository trait.
//!
//! `users.profile_image_id` is unique and set to NULL when its image is
//! deleted, which keeps the one-image-per-user rule in the schema.

use async_trait::async_trait;
use sqlx::MySqlPool;

use sf_core::domain::entities::ProfileImage;
use sf_core::errors::DomainError;
use sf_core::repositories::ProfileImageRepository;

use super::rows::{inserted_id, map_rows, row_to_profile_image};
use crate::database::errors::db_err;

pub struct MySqlProfileImageRepository {
    pool: MySqlPool,
}

impl MySqlProfileImageRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileImageRepository for MySqlProfileImageRepository {
    async fn find_all(&self) -> Result<Vec<ProfileImage>, DomainError> {
        let rows = sqlx::query("SELECT id, url FROM profile_images ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err("Failed to list profile images"))?;
        map_rows(&rows, row_to_profile_image)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProfileImage>, DomainError> {
        let row = sqlx::query("SELECT id, url FROM profile_images WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("Failed to load profile image"))?;
        row.as_ref().map(row_to_profile_image).transpose()
    }

    async fn create_for_user(&self, user_id: i32, url: &str) -> Result<ProfileImage, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let current: Option<Option<i32>> =
            sqlx::query_scalar("SELECT profile_image_id FROM users WHERE id = ? FOR UPDATE")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_err("Failed to load user"))?;
        match current {
            None => return Err(DomainError::not_found("User not found")),
            Some(Some(_)) => return Err(DomainError::conflict("Profile image already attached")),
            Some(None) => {}
        }

        let result = sqlx::query("INSERT INTO profile_images (url) VALUES (?)")
            .bind(url)
            .execute(&mut *tx)
            .await
            .map_err(db_err("Failed to create profile image"))?;
        let id = inserted_id(result.last_insert_id())?;

        sqlx::query("UPDATE users SET profile_image_id = ? WHERE id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(db_err("Failed to attach profile image"))?;

        tx.commit().await.map_err(db_err("Failed to commit transaction"))?;
        Ok(ProfileImage {
            id,
            url: url.to_string(),
        })
    }

    async fn update(&self, id: i32, url: Option<&str>) -> Result<Option<ProfileImage>, DomainError> {
        if let Some(url) = url {
            sqlx::query("UPDATE profile_images SET url = ? WHERE id = ?")
                .bind(url)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(db_err("Failed to update profile image"))?;
        }
        self.find_by_id(id).await
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM profile_images WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err("Failed to delete profile image"))?;
        Ok(result.rows_affected() > 0)
    }
}
