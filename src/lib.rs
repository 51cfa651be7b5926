//! # Kahramani Catalog Service
//!
//! Backend of the Kahramani jewellery site: fetches products and product
//! images from the commerce API with an OAuth2 client-credentials token,
//! and relays contact form messages.
//!
//! Modules:
//! - `config`: service configuration, category table, validation
//! - `cache`: bearer token cache
//! - `sources`: OAuth2 client-credentials exchange
//! - `catalog`: product listing and image resolution, degrading on failure
//! - `contact`: contact form validation and relay
//! - `server`: HTTP surface

pub mod cache;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod error;
pub mod helpers;
pub mod observability;
pub mod server;
pub mod sources;
pub mod utils;

#[cfg(test)]
mod tests;

pub use crate::config::service::ServiceConfig;
pub use crate::error::{ApiError, ApiResult};
