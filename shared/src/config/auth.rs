//! Authentication configuration

use serde::{Deserialize, Serialize};

use super::{parsed_var, required_var, ConfigError};

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret key for HS256 signing
    pub secret: String,

    /// Token lifetime in seconds, also used as the cookie `Max-Age`
    pub expiration_time: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("your-secret-key-change-in-production"),
            expiration_time: 3600,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set token lifetime in seconds
    pub fn with_expiration_time(mut self, seconds: i64) -> Self {
        self.expiration_time = seconds;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "your-secret-key-change-in-production"
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = required_var("JWT_SECRET")?;
        let expiration_time = parsed_var("JWT_EXPIRATION_TIME", 3600_i64)?;
        if expiration_time <= 0 {
            return Err(ConfigError::InvalidValue {
                name: "JWT_EXPIRATION_TIME",
                value: expiration_time.to_string(),
            });
        }

        Ok(Self {
            jwt: JwtConfig::new(secret).with_expiration_time(expiration_time),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.jwt.expiration_time, 3600);
        assert!(config.jwt.is_using_default_secret());
    }

    #[test]
    fn test_jwt_builder() {
        let jwt = JwtConfig::new("s3cret").with_expiration_time(120);
        assert_eq!(jwt.expiration_time, 120);
        assert!(!jwt.is_using_default_secret());
    }
}
