//! Product service module

mod service;

#[cfg(test)]
mod tests;

pub use service::{
    capitalize_description, preview_description, ProductService, DESCRIPTION_PREVIEW_LENGTH,
};
