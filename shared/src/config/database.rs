//! Database configuration module

use serde::{Deserialize, Serialize};

use super::{parsed_var, required_var, ConfigError};

/// Database configuration for MySQL connections
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of idle connections kept open
    pub min_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout: u64,

    /// Idle connection timeout in seconds
    pub idle_timeout: u64,

    /// Maximum lifetime of a connection in seconds
    pub max_lifetime: u64,

    /// Enable SQL statement logging
    #[serde(default)]
    pub enable_logging: bool,

    /// Slow query threshold in milliseconds
    #[serde(default = "default_slow_query_threshold")]
    pub slow_query_threshold: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::from("mysql://localhost:3306/storefront"),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: 30,
            idle_timeout: 600,
            max_lifetime: 1800,
            enable_logging: false,
            slow_query_threshold: default_slow_query_threshold(),
        }
    }
}

impl DatabaseConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = required_var("DATABASE_URL")?;
        let defaults = Self::default();

        Ok(Self {
            url,
            max_connections: parsed_var("DATABASE_MAX_CONNECTIONS", defaults.max_connections)?,
            connect_timeout: parsed_var("DATABASE_CONNECT_TIMEOUT", defaults.connect_timeout)?,
            enable_logging: parsed_var("DATABASE_LOG_STATEMENTS", defaults.enable_logging)?,
            ..defaults
        })
    }

    /// Create a new database configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Enable SQL statement logging
    pub fn with_logging(mut self, enable: bool) -> Self {
        self.enable_logging = enable;
        self
    }
}

fn default_slow_query_threshold() -> u64 {
    1000 // 1 second
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_methods() {
        let config = DatabaseConfig::new("mysql://db:3306/shop")
            .with_max_connections(25)
            .with_logging(true);

        assert_eq!(config.url, "mysql://db:3306/shop");
        assert_eq!(config.max_connections, 25);
        assert!(config.enable_logging);
        assert_eq!(config.slow_query_threshold, 1000);
    }
}
