//! Product repository trait.

use async_trait::async_trait;

use crate::domain::entities::product::{NewProduct, Product, ProductDetails, ProductPatch};
use crate::errors::DomainError;

/// Repository trait for Product persistence operations
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// List every product ordered by id
    async fn find_all(&self) -> Result<Vec<Product>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, DomainError>;

    /// Find a product with its owner and categories
    async fn find_details(&self, id: i32) -> Result<Option<ProductDetails>, DomainError>;

    /// Create a product and link it to `category_ids`
    ///
    /// # Errors
    /// * `DomainError::Conflict` - A product with this name already exists
    /// * `DomainError::BadRequest` - One of the category ids does not exist
    async fn create(&self, product: NewProduct) -> Result<Product, DomainError>;

    /// Apply a partial update; `Ok(None)` when the product does not exist
    async fn update(&self, id: i32, patch: ProductPatch) -> Result<Option<Product>, DomainError>;

    /// Delete a product; `Ok(false)` when it does not exist
    async fn delete(&self, id: i32) -> Result<bool, DomainError>;

    /// Add `delta` to the upvote counter without any floor
    async fn add_upvotes(&self, id: i32, delta: i32) -> Result<Option<Product>, DomainError>;

    /// Delete every product with fewer than `threshold` upvotes
    async fn delete_with_upvotes_below(&self, threshold: i32) -> Result<u64, DomainError>;

    /// Move every product of `from_user` to `to_user` atomically
    ///
    /// # Errors
    /// * `DomainError::NotFound` - Either user does not exist; nothing is changed
    async fn transfer_ownership(&self, from_user: i32, to_user: i32) -> Result<u64, DomainError>;
}
