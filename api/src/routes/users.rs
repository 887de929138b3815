//! Routes acting on the authenticated user's own account

use actix_web::{web, HttpResponse};

use crate::dto::{DeleteUserQuery, EditPhoneNumberRequest, UserResponse};
use crate::handlers::{validate, ApiError};
use crate::middleware::{AuthContext, JwtAuth};
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .wrap(JwtAuth)
            .route("/phone", web::patch().to(edit_phone_number))
            .route("", web::delete().to(delete_account)),
    );
}

async fn edit_phone_number(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<EditPhoneNumberRequest>,
) -> Result<HttpResponse, ApiError> {
    validate(&*request)?;
    let user = state
        .users
        .edit_phone_number(auth.user_id(), &request.phone_number)
        .await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// Handler for DELETE /users?newAuthor={id}
///
/// Deletes the caller's account. With `newAuthor` the caller's products are
/// handed to that user, otherwise they are deleted. Comments always go.
///
/// ## Errors
/// - 400 Bad Request: `newAuthor` is the caller
/// - 404 Not Found: `newAuthor` does not exist
async fn delete_account(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<DeleteUserQuery>,
) -> Result<HttpResponse, ApiError> {
    state
        .users
        .delete_user(auth.user_id(), query.new_author)
        .await?;
    Ok(HttpResponse::Ok().finish())
}
