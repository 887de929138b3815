//! Database module - MySQL implementations using SQLx
//!
//! This module provides database access layer implementations including:
//! - Connection pool management and migrations
//! - Repository implementations for every domain port
//! - The transaction used by category consolidation

pub mod connection;
mod errors;
pub mod mysql;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{
    MySqlBookRepository, MySqlCategoryRepository, MySqlCommentRepository,
    MySqlProductRepository, MySqlProfileImageRepository, MySqlUserRepository,
};
