use sf_shared::JwtConfig;

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};

use super::TokenService;

fn service() -> TokenService {
    TokenService::new(&JwtConfig::new("test-secret").with_expiration_time(900))
}

#[test]
fn test_generate_and_verify() {
    let service = service();

    let token = service.generate(42).unwrap();
    let claims = service.verify(&token).unwrap();

    assert_eq!(claims.user_id, 42);
    assert_eq!(claims.exp - claims.iat, 900);
}

#[test]
fn test_expired_token_is_rejected() {
    let service = service();
    let mut claims = Claims::new(42, 900);
    claims.iat -= 2000;
    claims.exp -= 2000;
    let token = service.encode_jwt(&claims).unwrap();

    assert_eq!(
        service.verify(&token).unwrap_err(),
        DomainError::Token(TokenError::TokenExpired)
    );
}

#[test]
fn test_token_from_other_secret_is_rejected() {
    let other = TokenService::new(&JwtConfig::new("another-secret"));
    let token = other.generate(42).unwrap();

    assert_eq!(
        service().verify(&token).unwrap_err(),
        DomainError::Token(TokenError::InvalidSignature)
    );
}

#[test]
fn test_garbage_token_is_rejected() {
    assert_eq!(
        service().verify("not-a-jwt").unwrap_err(),
        DomainError::Token(TokenError::InvalidTokenFormat)
    );
}

#[test]
fn test_cookies() {
    let service = service();

    assert_eq!(
        service.auth_cookie("abc"),
        "Authentication=abc; HttpOnly; Path=/; Max-Age=900"
    );
    assert_eq!(
        service.logout_cookie(),
        "Authentication=; HttpOnly; Path=/; Max-Age=0"
    );
}
