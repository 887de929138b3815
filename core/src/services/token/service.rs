//! Main token service implementation

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sf_shared::JwtConfig;

use crate::domain::entities::token::{Claims, AUTH_COOKIE_NAME};
use crate::errors::{DomainError, TokenError};

/// Service for signing and verifying access tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiration_time: i64,
}

impl TokenService {
    /// Creates a token service signing with the configured shared secret
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            expiration_time: config.expiration_time,
        }
    }

    /// Token lifetime in seconds
    pub fn expiration_time(&self) -> i64 {
        self.expiration_time
    }

    /// Signs a token carrying `user_id`
    pub fn generate(&self, user_id: i32) -> Result<String, DomainError> {
        let claims = Claims::new(user_id, self.expiration_time);
        self.encode_jwt(&claims)
    }

    pub(crate) fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies a token and returns its claims
    pub fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                let error = match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                    ErrorKind::MissingRequiredClaim(_) | ErrorKind::Json(_) => {
                        TokenError::InvalidClaims
                    }
                    _ => TokenError::InvalidTokenFormat,
                };
                DomainError::Token(error)
            })?;

        Ok(token_data.claims)
    }

    /// `Set-Cookie` value carrying a freshly signed token
    pub fn auth_cookie(&self, token: &str) -> String {
        format!(
            "{}={}; HttpOnly; Path=/; Max-Age={}",
            AUTH_COOKIE_NAME, token, self.expiration_time
        )
    }

    /// `Set-Cookie` value that clears the token
    pub fn logout_cookie(&self) -> String {
        format!("{}=; HttpOnly; Path=/; Max-Age=0", AUTH_COOKIE_NAME)
    }
}
