//! JWT authentication middleware for protecting API endpoints.
//!
//! The token is read from the `Authentication` cookie, falling back to an
//! `Authorization: Bearer` header. A valid token is resolved to the user it
//! was issued to and injected into the request as an [`AuthContext`].

use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use actix_web::{
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use sf_core::domain::entities::token::AUTH_COOKIE_NAME;
use sf_core::domain::entities::User;
use sf_core::errors::{DomainError, TokenError};

use crate::handlers::ApiError;
use crate::state::AppState;

/// Authenticated caller injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: User,
}

impl AuthContext {
    pub fn user_id(&self) -> i32 {
        self.user.id
    }
}

/// JWT authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let context = authenticate(req.request()).await?;
            req.extensions_mut().insert(context);
            service.call(req).await
        })
    }
}

/// Token from the auth cookie or, failing that, a Bearer header
fn extract_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(AUTH_COOKIE_NAME) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

async fn authenticate(req: &HttpRequest) -> Result<AuthContext, ApiError> {
    let token = extract_token(req).ok_or(DomainError::Token(TokenError::MissingToken))?;
    let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| DomainError::internal("Application state is not configured"))?;

    let user = state.auth.authenticate(&token).await?;
    tracing::debug!(user_id = user.id, "Request authenticated");
    Ok(AuthContext { user })
}

/// Extractor for routes wrapped in [`JwtAuth`]
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::from(DomainError::Unauthorized).into());

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;

    #[test]
    fn test_extract_bearer_token() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_http_request();
        assert_eq!(extract_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_http_request();
        assert_eq!(extract_token(&req_no_bearer), None);

        let req_no_header = TestRequest::default().to_http_request();
        assert_eq!(extract_token(&req_no_header), None);
    }

    #[test]
    fn test_cookie_wins_over_header() {
        let req = TestRequest::default()
            .cookie(Cookie::new(AUTH_COOKIE_NAME, "from_cookie"))
            .insert_header((AUTHORIZATION, "Bearer from_header"))
            .to_http_request();

        assert_eq!(extract_token(&req), Some("from_cookie".to_string()));
    }

    #[test]
    fn test_empty_cookie_falls_back_to_header() {
        let req = TestRequest::default()
            .cookie(Cookie::new(AUTH_COOKIE_NAME, ""))
            .insert_header((AUTHORIZATION, "Bearer from_header"))
            .to_http_request();

        assert_eq!(extract_token(&req), Some("from_header".to_string()));
    }
}
