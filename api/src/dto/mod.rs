pub mod auth;
pub mod book;
pub mod category;
pub mod comment;
pub mod product;
pub mod profile_image;

pub use auth::*;
pub use book::*;
pub use category::*;
pub use comment::*;
pub use product::*;
pub use profile_image::*;
