//! Shared constants and invariants

pub const DEFAULT_SAFETY_MARGIN_SECS: u64 = 300;
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;

pub const DEFAULT_AUTHORITY_URL: &str = "https://login.microsoftonline.com";
pub const GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";

pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 48;

/// Substituted whenever no product image can be resolved.
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.png";

pub const PRODUCTS_CACHE_CONTROL: &str = "public, s-maxage=300";
pub const IMAGES_CACHE_CONTROL: &str = "public, s-maxage=3600, stale-while-revalidate=86400";
