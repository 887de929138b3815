//! Product entity.

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::user::User;

/// A product offered in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    /// Price in grosze (1/100 PLN)
    #[serde(rename = "priceInPLNgr")]
    pub price_in_pln_gr: i32,
    pub is_in_stock: bool,
    pub description: String,
    /// Unbounded; downvotes may take it below zero
    pub upvotes: i32,
    pub user_id: i32,
}

/// Product with its owner and categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetails {
    #[serde(flatten)]
    pub product: Product,
    pub user: Option<User>,
    pub categories: Vec<Category>,
}

/// Data required to create a product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price_in_pln_gr: i32,
    pub is_in_stock: bool,
    pub description: String,
    pub user_id: i32,
    pub category_ids: Vec<i32>,
}

/// Partial update of a product. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price_in_pln_gr: Option<i32>,
    pub is_in_stock: Option<bool>,
    pub description: Option<String>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price_in_pln_gr.is_none()
            && self.is_in_stock.is_none()
            && self.description.is_none()
    }

    pub fn apply(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(price) = self.price_in_pln_gr {
            product.price_in_pln_gr = price;
        }
        if let Some(in_stock) = self.is_in_stock {
            product.is_in_stock = in_stock;
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
    }
}

/// Direction of a vote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpvoteChange {
    Up,
    Down,
}

impl UpvoteChange {
    pub fn delta(self) -> i32 {
        match self {
            UpvoteChange::Up => 1,
            UpvoteChange::Down => -1,
        }
    }
}
