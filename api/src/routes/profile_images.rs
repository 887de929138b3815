use actix_web::{web, HttpResponse};

use crate::dto::{CreateProfileImageRequest, UpdateProfileImageRequest};
use crate::handlers::{validate, ApiError};
use crate::middleware::{AuthContext, JwtAuth};
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/profileImages")
            .route("", web::get().to(get_all))
            .route("", web::post().to(create).wrap(JwtAuth))
            .route("/{id}", web::get().to(get_by_id))
            .route("/{id}", web::patch().to(update))
            .route("/{id}", web::delete().to(delete)),
    );
}

async fn get_all(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(state.profile_images.get_all().await?))
}

async fn get_by_id(state: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(state.profile_images.get_by_id(id.into_inner()).await?))
}

/// Handler for POST /profileImages
///
/// Attaches a new image to the caller. 409 when they already have one.
async fn create(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<CreateProfileImageRequest>,
) -> Result<HttpResponse, ApiError> {
    validate(&*request)?;
    let image = state
        .profile_images
        .create(auth.user_id(), &request.url)
        .await?;
    Ok(HttpResponse::Created().json(image))
}

async fn update(
    state: web::Data<AppState>,
    id: web::Path<i32>,
    request: web::Json<UpdateProfileImageRequest>,
) -> Result<HttpResponse, ApiError> {
    validate(&*request)?;
    let image = state
        .profile_images
        .update(id.into_inner(), request.url.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(image))
}

async fn delete(state: web::Data<AppState>, id: web::Path<i32>) -> Result<HttpResponse, ApiError> {
    state.profile_images.delete(id.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}
