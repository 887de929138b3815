//! Category routes, including consolidation of duplicates
//!
//! Mutations are expected to be authenticated upstream; these handlers do
//! not check the caller.

use actix_web::{web, HttpResponse};

use crate::dto::{CreateCategoryRequest, UpdateCategoryRequest};
use crate::handlers::{validate, ApiError};
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/categories")
            .route("", web::get().to(get_all))
            .route("", web::post().to(create))
            .route("/{id}", web::get().to(get_by_id))
            .route("/{id}", web::patch().to(update))
            .route("/{id}", web::delete().to(delete_with_products)),
    )
    .route("/merge-categories", web::patch().to(merge));
}

async fn get_all(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let categories = state.categories.get_all().await?;
    Ok(HttpResponse::Ok().json(categories))
}

async fn get_by_id(
    state: web::Data<AppState>,
    id: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let category = state.categories.get_by_id(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(category))
}

async fn create(
    state: web::Data<AppState>,
    request: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse, ApiError> {
    validate(&*request)?;
    let category = state.categories.create(&request.name).await?;
    Ok(HttpResponse::Created().json(category))
}

async fn update(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    request: web::Json<UpdateCategoryRequest>,
) -> Result<HttpResponse, ApiError> {
    validate(&*request)?;
    let category = state
        .categories
        .update(id.into_inner(), request.name.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(category))
}

/// Handler for DELETE /categories/{id}
///
/// Deletes the category and every product linked to it in one transaction.
///
/// ## Errors
/// - 404 Not Found: no category with this id; nothing is deleted
async fn delete_with_products(
    state: web::Data<AppState>,
    id: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    state
        .categories
        .delete_category_with_products(id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().finish())
}

/// Handler for PATCH /merge-categories
///
/// Collapses categories whose names match after trimming and lowercasing.
/// The smallest id in each group survives with the union of the group's
/// products.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "groupsMerged": 1, "categoriesRemoved": 1 }
/// ```
///
/// ## Errors
/// - 500 Internal Server Error: the merge failed and was rolled back
async fn merge(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let summary = state.categories.merge_categories().await?;
    Ok(HttpResponse::Ok().json(summary))
}
