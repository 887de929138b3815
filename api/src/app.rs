//! Application factory
//!
//! Builds the actix-web `App` with state, middleware, routes and the JSON
//! error handlers. Shared by `main` and the HTTP tests.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use sf_shared::{CorsConfig, ErrorResponse, HealthResponse};
use tracing_actix_web::TracingLogger;

use crate::handlers::ApiError;
use crate::middleware::create_cors;
use crate::routes;
use crate::state::AppState;

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
    cors: &CorsConfig,
    max_payload_size: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(app_state)
        .app_data(
            web::JsonConfig::default()
                .limit(max_payload_size)
                .error_handler(|err, _req| ApiError::bad_input(err.to_string()).into()),
        )
        .app_data(
            web::PathConfig::default()
                .error_handler(|err, _req| ApiError::bad_input(err.to_string()).into()),
        )
        .app_data(
            web::QueryConfig::default()
                .error_handler(|err, _req| ApiError::bad_input(err.to_string()).into()),
        )
        // Order matters: CORS runs inside the request span
        .wrap(create_cors(cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .configure(routes::configure)
        .default_service(web::route().to(not_found))
}

/// Liveness probe; does not touch the database
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy("storefront-api"))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "not_found",
        "The requested resource was not found",
    ))
}
