//! Repository ports implemented by the persistence adapters.

pub mod book;
pub mod category;
pub mod comment;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod product;
pub mod profile_image;
pub mod user;

pub use book::BookRepository;
pub use category::{CategoryRepository, CategoryTransaction};
pub use comment::CommentRepository;
pub use product::ProductRepository;
pub use profile_image::ProfileImageRepository;
pub use user::UserRepository;

#[cfg(any(test, feature = "test-support"))]
pub use memory::InMemoryStore;
