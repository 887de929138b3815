//! Test helpers shared by the HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::header,
    web, App, Error,
};
use sf_api::{create_app, AppState, Repositories};
use sf_core::repositories::InMemoryStore;
use sf_core::services::TokenService;
use sf_shared::{CorsConfig, JwtConfig};

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn jwt_config() -> JwtConfig {
    JwtConfig::new(TEST_SECRET).with_expiration_time(3600)
}

pub fn app_state(store: &InMemoryStore) -> web::Data<AppState> {
    let repositories = Repositories {
        categories: Arc::new(store.clone()),
        products: Arc::new(store.clone()),
        users: Arc::new(store.clone()),
        comments: Arc::new(store.clone()),
        books: Arc::new(store.clone()),
        profile_images: Arc::new(store.clone()),
    };
    web::Data::new(AppState::new(repositories, &jwt_config()))
}

/// The full application over an in-memory store
pub fn app(
    store: &InMemoryStore,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    create_app(app_state(store), &CorsConfig::default(), 1024 * 1024)
}

/// `Authorization` header value for a user id
pub fn bearer(user_id: i32) -> (header::HeaderName, String) {
    let token = TokenService::new(&jwt_config())
        .generate(user_id)
        .expect("token generation");
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// `name=value` part of a `Set-Cookie` header
pub fn cookie_pair<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|pair| pair.trim().to_string())
        .expect("Set-Cookie header")
}
