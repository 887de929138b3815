//! MySQL-specific database implementations
//!
//! This module contains MySQL implementations of repository traits
//! using SQLx for database operations.

pub mod book_repository_impl;
pub mod category_repository_impl;
pub mod comment_repository_impl;
pub mod product_repository_impl;
pub mod profile_image_repository_impl;
mod rows;
pub mod user_repository_impl;

// Re-export the MySQL implementations
pub use book_repository_impl::MySqlBookRepository;
pub use category_repository_impl::{MySqlCategoryRepository, MySqlCategoryTransaction};
pub use comment_repository_impl::MySqlCommentRepository;
pub use product_repository_impl::MySqlProductRepository;
pub use profile_image_repository_impl::MySqlProfileImageRepository;
pub use user_repository_impl::MySqlUserRepository;
