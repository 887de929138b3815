//! MySQL implementation of the UserRepository trait.
//!
//! Users are always read joined with their address. Account deletion runs in
//! one transaction so products, comments and the user disappear together.

use async_trait::async_trait;
use sqlx::{MySqlConnection, MySqlPool, Row};

use sf_core::domain::entities::{Address, NewUser, User};
use sf_core::errors::DomainError;
use sf_core::repositories::UserRepository;

use super::rows::{inserted_id, row_to_user, USER_COLUMNS};
use crate::database::errors::db_err;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn select_users(filter: &str) -> String {
        format!(
            "SELECT {} FROM users u LEFT JOIN addresses a ON a.id = u.address_id WHERE {} LIMIT 1",
            USER_COLUMNS, filter
        )
    }
}

async fn user_exists(conn: &mut MySqlConnection, id: i32) -> Result<bool, DomainError> {
    let found: Option<i32> = sqlx::query_scalar("SELECT id FROM users WHERE id = ? FOR UPDATE")
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(db_err("Failed to load user"))?;
    Ok(found.is_some())
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        let query = Self::select_users("u.id = ?");
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("Database query failed"))?;
        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = Self::select_users("u.email = ?");
        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("Database query failed"))?;
        row.as_ref().map(row_to_user).transpose()
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let address = match user.address {
            Some(address) => {
                let result =
                    sqlx::query("INSERT INTO addresses (street, city, country) VALUES (?, ?, ?)")
                        .bind(&address.street)
                        .bind(&address.city)
                        .bind(&address.country)
                        .execute(&mut *tx)
                        .await
                        .map_err(db_err("Failed to create address"))?;
                Some(Address {
                    id: inserted_id(result.last_insert_id())?,
                    street: address.street,
                    city: address.city,
                    country: address.country,
                })
            }
            None => None,
        };
        let address_id = address.as_ref().map(|address| address.id);

        let result = sqlx::query(
            "INSERT INTO users (email, name, password, phone_number, address_id) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password)
        .bind(&user.phone_number)
        .bind(address_id)
        .execute(&mut *tx)
        .await
        .map_err(db_err("Failed to create user"))?;
        let id = inserted_id(result.last_insert_id())?;

        tx.commit().await.map_err(db_err("Failed to commit transaction"))?;

        Ok(User {
            id,
            email: user.email,
            name: user.name,
            password: user.password,
            phone_number: user.phone_number,
            address_id,
            address,
            profile_image_id: None,
        })
    }

    async fn update_phone_number(
        &self,
        id: i32,
        phone_number: &str,
    ) -> Result<Option<User>, DomainError> {
        sqlx::query("UPDATE users SET phone_number = ? WHERE id = ?")
            .bind(phone_number)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err("Failed to update phone number"))?;
        self.find_by_id(id).await
    }

    async fn delete_account(&self, id: i32, new_author: Option<i32>) -> Result<bool, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let row = sqlx::query("SELECT address_id, profile_image_id FROM users WHERE id = ? FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err("Failed to load user"))?;
        let Some(row) = row else {
            return Ok(false);
        };
        let address_id: Option<i32> = row
            .try_get("address_id")
            .map_err(|e| DomainError::database(format!("Failed to get address_id: {}", e)))?;
        let profile_image_id: Option<i32> = row
            .try_get("profile_image_id")
            .map_err(|e| DomainError::database(format!("Failed to get profile_image_id: {}", e)))?;

        match new_author {
            Some(new_author) => {
                if !user_exists(&mut tx, new_author).await? {
                    return Err(DomainError::not_found("New author not found"));
                }
                sqlx::query("UPDATE products SET user_id = ? WHERE user_id = ?")
                    .bind(new_author)
                    .bind(id)
                    .execute(&mut *tx)
                    .await
                    .map_err(db_err("Failed to transfer products"))?;
            }
            None => {
                sqlx::query("DELETE FROM products WHERE user_id = ?")
                    .bind(id)
                    .execute(&mut *tx)
                    .await
                    .map_err(db_err("Failed to delete products"))?;
            }
        }

        sqlx::query("DELETE FROM comments WHERE user_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err("Failed to delete comments"))?;
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(db_err("Failed to delete user"))?;

        if let Some(address_id) = address_id {
            sqlx::query("DELETE FROM addresses WHERE id = ?")
                .bind(address_id)
                .execute(&mut *tx)
                .await
                .map_err(db_err("Failed to delete address"))?;
        }
        if let Some(image_id) = profile_image_id {
            sqlx::query("DELETE FROM profile_images WHERE id = ?")
                .bind(image_id)
                .execute(&mut *tx)
                .await
                .map_err(db_err("Failed to delete profile image"))?;
        }

        tx.commit().await.map_err(db_err("Failed to commit transaction"))?;
        Ok(true)
    }
}
