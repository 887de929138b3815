//! MySQL implementation of the ProductRepository trait.

use async_trait::async_trait;
use sqlx::{MySql, MySqlConnection, MySqlPool, QueryBuilder};

use sf_core::domain::entities::{NewProduct, Product, ProductDetails, ProductPatch};
use sf_core::errors::DomainError;
use sf_core::repositories::ProductRepository;

use super::rows::{
    inserted_id, map_rows, row_to_category, row_to_product, row_to_user, PRODUCT_COLUMNS,
    USER_COLUMNS,
};
use crate::database::errors::db_err;

/// MySQL implementation of ProductRepository
pub struct MySqlProductRepository {
    pool: MySqlPool,
}

impl MySqlProductRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

async fn select_product(
    conn: &mut MySqlConnection,
    id: i32,
    lock: bool,
) -> Result<Option<Product>, DomainError> {
    let query = format!(
        "SELECT {} FROM products p WHERE p.id = ?{}",
        PRODUCT_COLUMNS,
        if lock { " FOR UPDATE" } else { "" }
    );
    let row = sqlx::query(&query)
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(db_err("Failed to load product"))?;
    row.as_ref().map(row_to_product).transpose()
}

#[async_trait]
impl ProductRepository for MySqlProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, DomainError> {
        let query = format!("SELECT {} FROM products p ORDER BY p.id", PRODUCT_COLUMNS);
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err("Failed to list products"))?;
        map_rows(&rows, row_to_product)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, DomainError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(db_err("Failed to acquire connection"))?;
        select_product(&mut conn, id, false).await
    }

    async fn find_details(&self, id: i32) -> Result<Option<ProductDetails>, DomainError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(db_err("Failed to acquire connection"))?;
        let product = match select_product(&mut conn, id, false).await? {
            Some(product) => product,
            None => return Ok(None),
        };

        let user_query = format!(
            "SELECT {} FROM users u LEFT JOIN addresses a ON a.id = u.address_id WHERE u.id = ?",
            USER_COLUMNS
        );
        let user = sqlx::query(&user_query)
            .bind(product.user_id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(db_err("Failed to load product owner"))?
            .as_ref()
            .map(row_to_user)
            .transpose()?;

        let category_rows = sqlx::query(
            "SELECT c.id, c.name FROM categories c \
             JOIN category_products cp ON cp.category_id = c.id \
             WHERE cp.product_id = ? ORDER BY c.id",
        )
        .bind(id)
        .fetch_all(&mut *conn)
        .await
        .map_err(db_err("Failed to load product categories"))?;

        Ok(Some(ProductDetails {
            product,
            user,
            categories: map_rows(&category_rows, row_to_category)?,
        }))
    }

    async fn create(&self, product: NewProduct) -> Result<Product, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let result = sqlx::query(
            "INSERT INTO products (name, price_in_pln_gr, is_in_stock, description, upvotes, user_id) \
             VALUES (?, ?, ?, ?, 0, ?)",
        )
        .bind(&product.name)
        .bind(product.price_in_pln_gr)
        .bind(product.is_in_stock)
        .bind(&product.description)
        .bind(product.user_id)
        .execute(&mut *tx)
        .await
        .map_err(db_err("Failed to create product"))?;
        let id = inserted_id(result.last_insert_id())?;

        if !product.category_ids.is_empty() {
            let mut builder: QueryBuilder<'_, MySql> =
                QueryBuilder::new("INSERT INTO category_products (category_id, product_id) ");
            builder.push_values(&product.category_ids, |mut b, category_id| {
                b.push_bind(*category_id).push_bind(id);
            });
            builder.push(" ON DUPLICATE KEY UPDATE category_id = VALUES(category_id)");
            builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(db_err("Failed to link categories"))?;
        }

        tx.commit().await.map_err(db_err("Failed to commit transaction"))?;

        Ok(Product {
            id,
            name: product.name,
            price_in_pln_gr: product.price_in_pln_gr,
            is_in_stock: product.is_in_stock,
            description: product.description,
            upvotes: 0,
            user_id: product.user_id,
        })
    }

    async fn update(&self, id: i32, patch: ProductPatch) -> Result<Option<Product>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let mut product = match select_product(&mut tx, id, true).await? {
            Some(product) => product,
            None => return Ok(None),
        };
        if patch.is_empty() {
            return Ok(Some(product));
        }
        patch.apply(&mut product);

        sqlx::query(
            "UPDATE products SET name = ?, price_in_pln_gr = ?, is_in_stock = ?, description = ? \
             WHERE id = ?",
        )
        .bind(&product.name)
        .bind(product.price_in_pln_gr)
        .bind(product.is_in_stock)
        .bind(&product.description)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(db_err("Failed to update product"))?;

        tx.commit().await.map_err(db_err("Failed to commit transaction"))?;
        Ok(Some(product))
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err("Failed to delete product"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn add_upvotes(&self, id: i32, delta: i32) -> Result<Option<Product>, DomainError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(db_err("Failed to acquire connection"))?;
        sqlx::query("UPDATE products SET upvotes = upvotes + ? WHERE id = ?")
            .bind(delta)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(db_err("Failed to change upvotes"))?;
        select_product(&mut conn, id, false).await
    }

    async fn delete_with_upvotes_below(&self, threshold: i32) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM products WHERE upvotes < ?")
            .bind(threshold)
            .execute(&self.pool)
            .await
            .map_err(db_err("Failed to delete products"))?;
        Ok(result.rows_affected())
    }

    async fn transfer_ownership(&self, from_user: i32, to_user: i32) -> Result<u64, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_err("Failed to begin transaction"))?;

        let found: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id IN (?, ?) FOR UPDATE")
                .bind(from_user)
                .bind(to_user)
                .fetch_one(&mut *tx)
                .await
                .map_err(db_err("Failed to load users"))?;
        let expected = if from_user == to_user { 1 } else { 2 };
        if found < expected {
            return Err(DomainError::not_found("User not found"));
        }

        let result = sqlx::query("UPDATE products SET user_id = ? WHERE user_id = ?")
            .bind(to_user)
            .bind(from_user)
            .execute(&mut *tx)
            .await
            .map_err(db_err("Failed to transfer products"))?;

        tx.commit().await.map_err(db_err("Failed to commit transaction"))?;
        Ok(result.rows_affected())
    }
}
