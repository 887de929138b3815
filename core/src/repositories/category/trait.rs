//! Category store ports.
//!
//! Single-statement reads and writes go through [`CategoryRepository`]. Multi-step
//! workflows (duplicate consolidation, cascading delete) open a
//! [`CategoryTransaction`] and run every read and write through it, so either all
//! of their effects become visible or none do.

use async_trait::async_trait;

use crate::domain::entities::category::{Category, CategoryWithProducts};
use crate::errors::DomainError;

/// Repository trait for Category persistence operations
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List every category ordered by id
    async fn find_all(&self) -> Result<Vec<Category>, DomainError>;

    /// Find a category together with its linked products
    ///
    /// # Returns
    /// * `Ok(None)` - No category with the given id
    async fn find_by_id_with_products(
        &self,
        id: i32,
    ) -> Result<Option<CategoryWithProducts>, DomainError>;

    /// Create a category
    ///
    /// # Errors
    /// * `DomainError::Conflict` - The store rejected the name as a duplicate
    async fn create(&self, name: &str) -> Result<Category, DomainError>;

    /// Rename a category. A `None` name leaves the row as it is.
    ///
    /// # Returns
    /// * `Ok(None)` - No category with the given id
    ///
    /// # Errors
    /// * `DomainError::Conflict` - The store rejected the name as a duplicate
    async fn update(&self, id: i32, name: Option<&str>) -> Result<Option<Category>, DomainError>;

    /// Open a transaction scope
    async fn begin(&self) -> Result<Box<dyn CategoryTransaction>, DomainError>;
}

/// Unit of work over categories and their product links
///
/// Dropping a transaction without calling [`CategoryTransaction::commit`] rolls it back.
#[async_trait]
pub trait CategoryTransaction: Send {
    /// List every category ordered by id
    async fn find_all(&mut self) -> Result<Vec<Category>, DomainError>;

    async fn find_by_id_with_products(
        &mut self,
        id: i32,
    ) -> Result<Option<CategoryWithProducts>, DomainError>;

    /// Remove the links between `category_id` and `product_ids`. Missing links are ignored.
    async fn disconnect_products(
        &mut self,
        category_id: i32,
        product_ids: &[i32],
    ) -> Result<(), DomainError>;

    /// Link `category_id` to `product_ids`. Existing links are kept.
    async fn connect_products(
        &mut self,
        category_id: i32,
        product_ids: &[i32],
    ) -> Result<(), DomainError>;

    /// Set the products of `category_id` to exactly `product_ids`
    async fn replace_products(
        &mut self,
        category_id: i32,
        product_ids: &[i32],
    ) -> Result<(), DomainError>;

    /// Delete a category row
    ///
    /// # Returns
    /// * `Ok(false)` - No category with the given id
    async fn delete_category(&mut self, id: i32) -> Result<bool, DomainError>;

    /// Delete products (and their category links), returning how many rows went away
    async fn delete_products(&mut self, product_ids: &[i32]) -> Result<u64, DomainError>;

    /// Make every change of this transaction visible
    async fn commit(&mut self) -> Result<(), DomainError>;
}
