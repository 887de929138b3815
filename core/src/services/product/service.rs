//! Product service implementation

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::product::{
    NewProduct, Product, ProductDetails, ProductPatch, UpvoteChange,
};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::ProductRepository;

/// Number of description characters shown in product listings
pub const DESCRIPTION_PREVIEW_LENGTH: usize = 100;

const PRODUCT_EXISTS: &str = "Product with this name already exists.";
const WRONG_CATEGORY: &str = "Wrong category id provided.";
const NOTHING_MATCHES: &str = "Not product matches criteria.";
const MISSING_USERS: &str = "At least one of the users doesn't exist.";

fn product_not_found(id: i32) -> DomainError {
    DomainError::not_found(format!("Product with {} cannot be found.", id))
}

/// Service for product management
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> DomainResult<Vec<Product>> {
        self.repository.find_all().await
    }

    /// Get a product with its owner and categories
    pub async fn get_one(&self, id: i32) -> DomainResult<ProductDetails> {
        self.repository
            .find_details(id)
            .await?
            .ok_or_else(|| product_not_found(id))
    }

    /// Create a product owned by `product.user_id`
    pub async fn create(&self, product: NewProduct) -> DomainResult<Product> {
        let created = self
            .repository
            .create(product)
            .await
            .map_err(|e| match e {
                DomainError::Conflict { .. } => DomainError::conflict(PRODUCT_EXISTS),
                DomainError::BadRequest { .. } => DomainError::bad_request(WRONG_CATEGORY),
                other => other,
            })?;
        info!(product_id = created.id, owner = created.user_id, "Product created");
        Ok(created)
    }

    pub async fn update(&self, id: i32, patch: ProductPatch) -> DomainResult<Product> {
        self.repository
            .update(id, patch)
            .await
            .map_err(|e| match e {
                DomainError::Conflict { .. } => DomainError::conflict(PRODUCT_EXISTS),
                other => other,
            })?
            .ok_or_else(|| product_not_found(id))
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        if !self.repository.delete(id).await? {
            return Err(product_not_found(id));
        }
        info!(product_id = id, "Product deleted");
        Ok(())
    }

    /// Add or remove one upvote. The counter has no floor.
    pub async fn vote(&self, id: i32, change: UpvoteChange) -> DomainResult<Product> {
        self.repository
            .add_upvotes(id, change.delta())
            .await?
            .ok_or_else(|| product_not_found(id))
    }

    /// Delete every product with fewer than `threshold` upvotes
    pub async fn delete_with_upvotes_below(&self, threshold: i32) -> DomainResult<String> {
        let deleted = self.repository.delete_with_upvotes_below(threshold).await?;
        if deleted == 0 {
            return Err(DomainError::not_found(NOTHING_MATCHES));
        }
        info!(threshold, deleted, "Low-rated products deleted");
        Ok(format!("Deleted {} products.", deleted))
    }

    /// Hand every product of `old_user_id` to `new_user_id`
    pub async fn change_ownership(&self, old_user_id: i32, new_user_id: i32) -> DomainResult<u64> {
        let moved = self
            .repository
            .transfer_ownership(old_user_id, new_user_id)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    warn!(old_user_id, new_user_id, "Ownership change for unknown user");
                    DomainError::not_found(MISSING_USERS)
                } else {
                    e
                }
            })?;
        info!(old_user_id, new_user_id, moved, "Product ownership changed");
        Ok(moved)
    }
}

/// Shorten a description for listings: longer than the preview length gets cut and `...` appended
pub fn preview_description(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_PREVIEW_LENGTH {
        let cut: String = description.chars().take(DESCRIPTION_PREVIEW_LENGTH).collect();
        format!("{}...", cut)
    } else {
        description.to_string()
    }
}

/// Upper-case the first character of a description
pub fn capitalize_description(description: &str) -> String {
    let mut chars = description.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
