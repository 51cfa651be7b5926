use serde::Deserialize;

use crate::config::settings::SettingsConfig;
use crate::utils::constants::{DEFAULT_AUTHORITY_URL, DEFAULT_MAX_PAGE_SIZE, DEFAULT_PAGE_SIZE};

/// ================================
/// Full service configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub settings: SettingsConfig,
    pub identity: IdentityConfig,
    pub catalog: CatalogConfig,
    pub contact: Option<ContactConfig>,
}

/// ================================
/// Identity provider (client credentials)
/// ================================
#[derive(Deserialize, Clone)]
pub struct IdentityConfig {
    #[serde(default = "default_authority_url")]
    pub authority_url: String,
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub scope: String,
}

impl IdentityConfig {
    /// `{authority}/{tenant}/oauth2/v2.0/token`
    pub fn token_url(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority_url.trim_end_matches('/'),
            self.tenant_id.trim()
        )
    }
}

impl std::fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("authority_url", &self.authority_url)
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("scope", &self.scope)
            .finish()
    }
}

/// ================================
/// Commerce API
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// e.g. https://host/api, products live under `{base_url}/products`
    pub base_url: String,
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    /// invariant: >= default_page_size
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

/// ================================
/// Contact form relay
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ContactConfig {
    /// mailbox the site sends from
    #[serde(default)]
    pub sender: String,
    pub recipient: String,
    /// mail gateway endpoint; empty means delivery is not configured
    #[serde(default)]
    pub relay_url: Option<String>,
    #[serde(default = "default_sender_name")]
    pub sender_name: String,
}

impl ContactConfig {
    pub fn relay_url(&self) -> Option<&str> {
        self.relay_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

fn default_authority_url() -> String {
    DEFAULT_AUTHORITY_URL.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_max_page_size() -> u32 {
    DEFAULT_MAX_PAGE_SIZE
}

fn default_sender_name() -> String {
    "Kahramani Website".to_string()
}
