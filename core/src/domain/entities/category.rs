//! Category entity and the shapes used while consolidating duplicates.

use serde::{Deserialize, Serialize};

use super::product::Product;

/// A product category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

impl Category {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Key under which categories are considered duplicates of each other
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }
}

/// Lowercase and trim a category name. Internal whitespace and Unicode forms are left as-is.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A category together with every product linked to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWithProducts {
    #[serde(flatten)]
    pub category: Category,
    pub products: Vec<Product>,
}

impl CategoryWithProducts {
    pub fn id(&self) -> i32 {
        self.category.id
    }

    pub fn product_ids(&self) -> Vec<i32> {
        self.products.iter().map(|product| product.id).collect()
    }
}

/// Outcome of a merge run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeSummary {
    /// Number of duplicate groups that were collapsed
    pub groups_merged: usize,
    /// Number of duplicate category rows deleted
    pub categories_removed: usize,
}
