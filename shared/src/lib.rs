//! Shared utilities and common types for the storefront server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration loaded from the environment
//! - Error response structures
//! - Utility functions (phone validation and masking)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, CorsConfig, DatabaseConfig, Environment, JwtConfig,
    ServerConfig,
};
pub use types::{ErrorResponse, HealthResponse, HealthStatus};
pub use utils::phone;
