//! Business services containing domain logic and use cases.

pub mod auth;
pub mod book;
pub mod category;
pub mod comment;
pub mod product;
pub mod profile_image;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use auth::{AuthService, Registration};
pub use book::BookService;
pub use category::CategoryService;
pub use comment::CommentService;
pub use product::{capitalize_description, preview_description, ProductService};
pub use profile_image::ProfileImageService;
pub use token::TokenService;
pub use user::UserService;
