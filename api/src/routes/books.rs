use actix_web::{web, HttpResponse};

use crate::dto::{CreateBookRequest, UpdateBookRequest};
use crate::handlers::{validate, ApiError};
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/books")
            .route("", web::get().to(get_all))
            .route("", web::post().to(create))
            .route("/{id}", web::get().to(get_by_id))
            .route("/{id}", web::patch().to(update))
            .route("/{id}", web::delete().to(delete)),
    );
}

async fn get_all(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(state.books.get_all().await?))
}

async fn get_by_id(state: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(state.books.get_by_id(id.into_inner()).await?))
}

async fn create(
    state: web::Data<AppState>,
    request: web::Json<CreateBookRequest>,
) -> Result<HttpResponse, ApiError> {
    validate(&*request)?;
    let book = state.books.create(request.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(book))
}

async fn update(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    request: web::Json<UpdateBookRequest>,
) -> Result<HttpResponse, ApiError> {
    validate(&*request)?;
    let book = state
        .books
        .update(id.into_inner(), request.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(book))
}

async fn delete(state: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, ApiError> {
    state.books.delete(id.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}
