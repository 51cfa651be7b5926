//! Commerce API integration: product listing and image resolution.
//!
//! Both public operations degrade instead of failing; the `*_outcome`
//! variants keep the reason for callers that need to tell a broken
//! upstream from a genuinely empty result.

pub mod client;
pub mod images;
pub mod outcome;
pub mod page;
pub mod products;

pub use client::CatalogClient;
pub use images::{ImageRecord, ImageRef, ProductImageSet};
pub use outcome::Fetched;
pub use page::{LocalizedText, Page, ProductListing};
