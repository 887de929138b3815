//! Storefront HTTP API
//!
//! actix-web routes, request DTOs, the JWT guard and the mapping from domain
//! errors to JSON responses.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use app::create_app;
pub use state::{AppState, Repositories};
