use serde::{Deserialize, Serialize};
use sf_core::domain::entities::{Category, NewProduct, Product, ProductDetails, ProductPatch};
use sf_core::services::{capitalize_description, preview_description};
use validator::Validate;

use super::auth::UserResponse;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(rename = "priceInPLNgr")]
    #[validate(range(min = 0))]
    pub price_in_pln_gr: i32,
    pub is_in_stock: bool,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(default)]
    pub category_ids: Vec<i32>,
}

impl CreateProductRequest {
    pub fn into_new_product(self, user_id: i32) -> NewProduct {
        NewProduct {
            name: self.name,
            price_in_pln_gr: self.price_in_pln_gr,
            is_in_stock: self.is_in_stock,
            description: self.description,
            user_id,
            category_ids: self.category_ids,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[serde(rename = "priceInPLNgr")]
    #[validate(range(min = 0))]
    pub price_in_pln_gr: Option<i32>,
    pub is_in_stock: Option<bool>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
}

impl From<UpdateProductRequest> for ProductPatch {
    fn from(request: UpdateProductRequest) -> Self {
        Self {
            name: request.name,
            price_in_pln_gr: request.price_in_pln_gr,
            is_in_stock: request.is_in_stock,
            description: request.description,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpvotesFilterQuery {
    pub upvotes_fewer_than: i32,
}

/// Listing entry with a shortened description
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListItem {
    pub id: i32,
    pub name: String,
    #[serde(rename = "priceInPLNgr")]
    pub price_in_pln_gr: i32,
    pub is_in_stock: bool,
    pub description: String,
    pub description_length: usize,
    pub upvotes: i32,
}

impl From<Product> for ProductListItem {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            description: preview_description(&product.description),
            description_length: product.description.chars().count(),
            name: product.name,
            price_in_pln_gr: product.price_in_pln_gr,
            is_in_stock: product.is_in_stock,
            upvotes: product.upvotes,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailsResponse {
    pub id: i32,
    pub name: String,
    #[serde(rename = "priceInPLNgr")]
    pub price_in_pln_gr: i32,
    pub is_in_stock: bool,
    pub description: String,
    pub upvotes: i32,
    pub user_id: i32,
    pub user: Option<UserResponse>,
    pub categories: Vec<Category>,
}

impl From<ProductDetails> for ProductDetailsResponse {
    fn from(details: ProductDetails) -> Self {
        let product = details.product;
        Self {
            id: product.id,
            name: product.name,
            price_in_pln_gr: product.price_in_pln_gr,
            is_in_stock: product.is_in_stock,
            description: capitalize_description(&product.description),
            upvotes: product.upvotes,
            user_id: product.user_id,
            user: details.user.map(UserResponse::from),
            categories: details.categories,
        }
    }
}
