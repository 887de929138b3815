//! Category service module
//!
//! Plain category CRUD plus the two transactional workflows:
//! - duplicate consolidation (`merge_categories`)
//! - cascading delete of a category and its products

mod service;


pub use service::CategoryService;
