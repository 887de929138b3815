//! Domain entities representing core business objects.

pub mod book;
pub mod category;
pub mod comment;
pub mod product;
pub mod profile_image;
pub mod token;
pub mod user;

pub use book::{Author, Book, BookPatch, BookWithAuthors, NewBook};
pub use category::{normalize_name, Category, CategoryWithProducts, MergeSummary};
pub use comment::Comment;
pub use product::{NewProduct, Product, ProductDetails, ProductPatch, UpvoteChange};
pub use profile_image::ProfileImage;
pub use token::{Claims, AUTH_COOKIE_NAME};
pub use user::{Address, NewAddress, NewUser, User};
