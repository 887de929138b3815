//! MySQL implementation of the CategoryRepository trait.
//!
//! Category names are stored with a binary collation, so uniqueness is exact
//! and case or whitespace variants coexist until a merge consolidates them.
//! Workflows spanning several statements run through
//! [`MySqlCategoryTransaction`].

use async_trait::async_trait;
use sqlx::{MySql, MySqlConnection, MySqlPool, QueryBuilder, Transaction};

use sf_core::domain::entities::{Category, CategoryWithProducts};
use sf_core::errors::DomainError;
use sf_core::repositories::{CategoryRepository, CategoryTransaction};

use super::rows::{
    inserted_id, link_products, map_rows, products_of_category, push_id_list, row_to_category,
};
use crate::database::errors::db_err;

/// MySQL implementation of CategoryRepository
pub struct MySqlCategoryRepository {
    pool: MySqlPool,
}

impl MySqlCategoryRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

async fn select_all(conn: &mut MySqlConnection) -> Result<Vec<Category>, DomainError> {
    let rows = sqlx::query("SELECT id, name FROM categories ORDER BY id")
        .fetch_all(conn)
        .await
        .map_err(db_err("Failed to list categories"))?;
    map_rows(&rows, row_to_category)
}

/// Load a category with its products; `lock` takes a row lock for the rest of the transaction
async fn select_with_products(
    conn: &mut MySqlConnection,
    id: i32,
    lock: bool,
) -> Result<Option<CategoryWithProducts>, DomainError> {
    let query = if lock {
        "SELECT id, name FROM categories WHERE id = ? FOR UPDATE"
    } else {
        "SELECT id, name FROM categories WHERE id = ?"
    };
    let row = sqlx::query(query)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(db_err("Failed to load category"))?;

    let category = match row {
        Some(row) => row_to_category(&row)?,
        None => return Ok(None),
    };
    let products = products_of_category(conn, id).await?;
    Ok(Some(CategoryWithProducts { category, products }))
}

#[async_trait]
impl CategoryRepository for MySqlCategoryRepository {
    async fn find_all(&self) -> Result<Vec<Category>, DomainError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(db_err("Failed to acquire connection"))?;
        select_all(&mut conn).await
    }

    async fn find_by_id_with_products(
        &self,
        id: i32,
    ) -> Result<Option<CategoryWithProducts>, DomainError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(db_err("Failed to acquire connection"))?;
        select_with_products(&mut conn, id, false).await
    }

    async fn create(&self, name: &str) -> Result<Category, DomainError> {
        let result = sqlx::query("INSERT INTO categories (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(db_err("Failed to create category"))?;

        Ok(Category::new(inserted_id(result.last_insert_id())?, name))
    }

    async fn update(&self, id: i32, name: Option<&str>) -> Result<Option<Category>, DomainError> {
        if let Some(name) = name {
            sqlx::query("UPDATE categories SET name = ? WHERE id = ?")
                .bind(name)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(db_err("Failed to update category"))?;
        }

        let row = sqlx::query("SELECT id, name FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err("Failed to load category"))?;
        row.as_ref().map(row_to_category).transpose()
    }

    async fn begin(&self) -> Result<Box<dyn CategoryTransaction>, DomainError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;
        Ok(Box::new(MySqlCategoryTransaction { tx: Some(tx) }))
    }
}

/// An open MySQL transaction; dropping it without `commit` rolls back
pub struct MySqlCategoryTransaction {
    tx: Option<Transaction<'static, MySql>>,
}

impl MySqlCategoryTransaction {
    fn conn(&mut self) -> Result<&mut MySqlConnection, DomainError> {
        self.tx
            .as_deref_mut()
            .ok_or_else(|| DomainError::internal("Transaction already committed"))
    }

    async fn ensure_category(&mut self, category_id: i32) -> Result<(), DomainError> {
        let found: Option<i32> =
            sqlx::query_scalar("SELECT id FROM categories WHERE id = ? FOR UPDATE")
                .bind(category_id)
                .fetch_optional(self.conn()?)
                .await
                .map_err(db_err("Failed to load category"))?;
        match found {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("Category not found")),
        }
    }
}

#[async_trait]
impl CategoryTransaction for MySqlCategoryTransaction {
    async fn find_all(&mut self) -> Result<Vec<Category>, DomainError> {
        select_all(self.conn()?).await
    }

    async fn find_by_id_with_products(
        &mut self,
        id: i32,
    ) -> Result<Option<CategoryWithProducts>, DomainError> {
        select_with_products(self.conn()?, id, true).await
    }

    async fn disconnect_products(
        &mut self,
        category_id: i32,
        product_ids: &[i32],
    ) -> Result<(), DomainError> {
        if product_ids.is_empty() {
            return Ok(());
        }
        let mut builder: QueryBuilder<'_, MySql> =
            QueryBuilder::new("DELETE FROM category_products WHERE category_id = ");
        builder.push_bind(category_id);
        builder.push(" AND product_id IN ");
        push_id_list(&mut builder, product_ids);
        builder
            .build()
            .execute(self.conn()?)
            .await
            .map_err(db_err("Failed to unlink products"))?;
        Ok(())
    }

    async fn connect_products(
        &mut self,
        category_id: i32,
        product_ids: &[i32],
    ) -> Result<(), DomainError> {
        self.ensure_category(category_id).await?;
        link_products(self.conn()?, category_id, product_ids).await
    }

    async fn replace_products(
        &mut self,
        category_id: i32,
        product_ids: &[i32],
    ) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM category_products WHERE category_id = ?")
            .bind(category_id)
            .execute(self.conn()?)
            .await
            .map_err(db_err("Failed to unlink products"))?;
        self.connect_products(category_id, product_ids).await
    }

    async fn delete_category(&mut self, id: i32) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(self.conn()?)
            .await
            .map_err(db_err("Failed to delete category"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_products(&mut self, product_ids: &[i32]) -> Result<u64, DomainError> {
        if product_ids.is_empty() {
            return Ok(0);
        }
        let mut builder: QueryBuilder<'_, MySql> =
            QueryBuilder::new("DELETE FROM products WHERE id IN ");
        push_id_list(&mut builder, product_ids);
        let result = builder
            .build()
            .execute(self.conn()?)
            .await
            .map_err(db_err("Failed to delete products"))?;
        Ok(result.rows_affected())
    }

    async fn commit(&mut self) -> Result<(), DomainError> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| DomainError::internal("Transaction already committed"))?;
        tx.commit().await.map_err(db_err("Failed to commit transaction"))
    }
}
