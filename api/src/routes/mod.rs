//! HTTP route handlers, one module per resource

pub mod authentication;
pub mod books;
pub mod categories;
pub mod comments;
pub mod products;
pub mod profile_images;
pub mod users;

use actix_web::web;

/// Register every resource scope
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(categories::configure)
        .configure(products::configure)
        .configure(users::configure)
        .configure(authentication::configure)
        .configure(comments::configure)
        .configure(books::configure)
        .configure(profile_images::configure);
}
