use actix_web::{web, HttpResponse};

use crate::dto::{CreateCommentRequest, UpdateCommentRequest};
use crate::handlers::{validate, ApiError};
use crate::middleware::{AuthContext, JwtAuth};
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/comments")
            .route("", web::get().to(get_all))
            .route("", web::post().to(create).wrap(JwtAuth))
            .route("/{id}", web::get().to(get_by_id))
            .route("/{id}", web::patch().to(update))
            .route("/{id}", web::delete().to(delete)),
    );
}

async fn get_all(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(state.comments.get_all().await?))
}

async fn get_by_id(state: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(state.comments.get_by_id(id.into_inner()).await?))
}

async fn create(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse, ApiError> {
    validate(&*request)?;
    let comment = state.comments.create(auth.user_id(), &request.text).await?;
    Ok(HttpResponse::Created().json(comment))
}

async fn update(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    request: web::Json<UpdateCommentRequest>,
) -> Result<HttpResponse, ApiError> {
    validate(&*request)?;
    let comment = state
        .comments
        .update(id.into_inner(), request.text.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(comment))
}

async fn delete(state: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, ApiError> {
    state.comments.delete(id.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}
