//! Token entities for JWT-based authentication.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Cookie carrying the access token
pub const AUTH_COOKIE_NAME: &str = "Authentication";

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated user
    #[serde(rename = "userId")]
    pub user_id: i32,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates claims for a token valid for `lifetime_seconds`
    pub fn new(user_id: i32, lifetime_seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(lifetime_seconds)).timestamp(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}
