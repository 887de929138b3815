//! Sign-up, log-in and session routes

use actix_web::{http::header, web, HttpResponse};

use crate::dto::{LogInRequest, SignUpRequest, UserResponse};
use crate::handlers::{validate, ApiError};
use crate::middleware::{AuthContext, JwtAuth};
use crate::state::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/authentication")
            .route("", web::get().to(current_user).wrap(JwtAuth))
            .route("/sign-up", web::post().to(sign_up))
            .route("/log-in", web::post().to(log_in))
            .route("/log-out", web::post().to(log_out)),
    );
}

/// Handler for POST /authentication/sign-up
///
/// # Request Body
///
/// ```json
/// {
///     "email": "ada@example.com",
///     "name": "Ada",
///     "password": "at least 8 characters",
///     "phoneNumber": "+48123456789",
///     "address": { "street": "Main 1", "city": "Gdansk", "country": "Poland" }
/// }
/// ```
///
/// `phoneNumber` and `address` are optional.
///
/// ## Errors
/// - 400 Bad Request: invalid body or phone number
/// - 409 Conflict: email already registered
async fn sign_up(
    state: web::Data<AppState>,
    request: web::Json<SignUpRequest>,
) -> Result<HttpResponse, ApiError> {
    validate(&*request)?;
    if let Some(address) = &request.address {
        validate(address)?;
    }

    let user = state.auth.sign_up(request.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Handler for POST /authentication/log-in
///
/// Sets the `Authentication` cookie on success.
async fn log_in(
    state: web::Data<AppState>,
    request: web::Json<LogInRequest>,
) -> Result<HttpResponse, ApiError> {
    validate(&*request)?;
    let (user, cookie) = state.auth.log_in(&request.email, &request.password).await?;
    Ok(HttpResponse::Ok()
        .insert_header((header::SET_COOKIE, cookie))
        .json(UserResponse::from(user)))
}

async fn log_out(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::SET_COOKIE, state.auth.log_out()))
        .finish()
}

async fn current_user(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(UserResponse::from(auth.user))
}
