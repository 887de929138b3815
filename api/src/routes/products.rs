//! Product routes

use actix_web::{web, HttpResponse};
use serde_json::json;
use sf_core::domain::entities::UpvoteChange;

use crate::dto::{
    CreateProductRequest, ProductDetailsResponse, ProductListItem, UpdateProductRequest,
    UpvotesFilterQuery,
};
use crate::handlers::{validate, ApiError};
use crate::middleware::{AuthContext, JwtAuth};
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .route("", web::get().to(get_all))
            .route("", web::post().to(create).wrap(JwtAuth))
            .route(
                "/changeOwnership/{old_user_id}/{new_user_id}",
                web::patch().to(change_ownership),
            )
            .route("/filter", web::delete().to(delete_filtered).wrap(JwtAuth))
            .route("/{id}", web::get().to(get_one))
            .route("/{id}", web::patch().to(update).wrap(JwtAuth))
            .route("/{id}", web::delete().to(delete).wrap(JwtAuth))
            .route("/{id}/upvote", web::patch().to(upvote))
            .route("/{id}/downvote", web::patch().to(downvote)),
    );
}

async fn get_all(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let products: Vec<ProductListItem> = state
        .products
        .get_all()
        .await?
        .into_iter()
        .map(ProductListItem::from)
        .collect();
    Ok(HttpResponse::Ok().json(products))
}

async fn get_one(state: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, ApiError> {
    let details = state.products.get_one(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ProductDetailsResponse::from(details)))
}

/// Handler for POST /products
///
/// Creates a product owned by the caller and links `categoryIds`.
///
/// ## Errors
/// - 400 Bad Request: invalid body or unknown category id
/// - 401 Unauthorized: missing or invalid token
/// - 409 Conflict: a product with this name exists
async fn create(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, ApiError> {
    validate(&*request)?;
    let product = state
        .products
        .create(request.into_inner().into_new_product(auth.user_id()))
        .await?;
    Ok(HttpResponse::Created().json(product))
}

async fn update(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    request: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, ApiError> {
    validate(&*request)?;
    let product = state
        .products
        .update(id.into_inner(), request.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(product))
}

async fn delete(state: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, ApiError> {
    state.products.delete(id.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

async fn upvote(state: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, ApiError> {
    let product = state.products.vote(id.into_inner(), UpvoteChange::Up).await?;
    Ok(HttpResponse::Ok().json(product))
}

async fn downvote(state: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, ApiError> {
    let product = state.products.vote(id.into_inner(), UpvoteChange::Down).await?;
    Ok(HttpResponse::Ok().json(product))
}

/// Handler for DELETE /products/filter?upvotesFewerThan=N
async fn delete_filtered(
    state: web::Data<AppState>,
    query: web::Query<UpvotesFilterQuery>,
) -> Result<HttpResponse, ApiError> {
    let message = state
        .products
        .delete_with_upvotes_below(query.upvotes_fewer_than)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "message": message })))
}

async fn change_ownership(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
) -> Result<HttpResponse, ApiError> {
    let (old_user_id, new_user_id) = path.into_inner();
    let moved = state
        .products
        .change_ownership(old_user_id, new_user_id)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "productsMoved": moved })))
}
