use serde::{Deserialize, Serialize};
use sf_core::domain::entities::{BookPatch, NewBook};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(rename = "priceInPLNgr")]
    #[validate(length(min = 1))]
    pub price_in_pln_gr: String,
    #[serde(default)]
    pub author_ids: Vec<i32>,
}

impl From<CreateBookRequest> for NewBook {
    fn from(request: CreateBookRequest) -> Self {
        Self {
            title: request.title,
            price_in_pln_gr: request.price_in_pln_gr,
            author_ids: request.author_ids,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[serde(rename = "priceInPLNgr")]
    #[validate(length(min = 1))]
    pub price_in_pln_gr: Option<String>,
    pub author_ids: Option<Vec<i32>>,
}

impl From<UpdateBookRequest> for BookPatch {
    fn from(request: UpdateBookRequest) -> Self {
        Self {
            title: request.title,
            price_in_pln_gr: request.price_in_pln_gr,
            author_ids: request.author_ids,
        }
    }
}
