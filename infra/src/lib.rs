//! # Infrastructure Layer
//!
//! MySQL persistence for the storefront backend. Every repository port
//! defined in `sf_core::repositories` has a SQLx implementation here, and
//! [`database::DatabasePool`] owns the connection pool and migrations.

// Re-export core types for convenience
pub use sf_core::errors::*;

/// Database module - MySQL implementations using SQLx
pub mod database;

pub use database::{
    DatabasePool, MySqlBookRepository, MySqlCategoryRepository, MySqlCommentRepository,
    MySqlProductRepository, MySqlProfileImageRepository, MySqlUserRepository, PoolStatistics,
};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
