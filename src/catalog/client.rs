use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Url};
use tracing::warn;

use crate::cache::token_cache::TokenCache;
use crate::config::service::{CatalogConfig, ServiceConfig};
use crate::error::{ApiError, ApiResult};
use crate::helpers::time::get_token_safety_margin_seconds;
use crate::observability::metrics::Metrics;
use crate::sources::oauth2::OAuth2Source;

pub(crate) const OP_LIST_PRODUCTS: &str = "list_products";
pub(crate) const OP_LIST_IMAGES: &str = "list_images";

/// Authenticated client for the commerce API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: Url,
    client: Client,
    tokens: TokenCache,
    auth: OAuth2Source,
    pub(crate) metrics: Arc<Metrics>,
}

impl CatalogClient {
    pub fn new(
        catalog: &CatalogConfig,
        client: Client,
        tokens: TokenCache,
        auth: OAuth2Source,
        metrics: Arc<Metrics>,
    ) -> ApiResult<Self> {
        let base_url = Url::parse(&catalog.base_url).map_err(|e| {
            ApiError::Configuration(format!("catalog.base_url '{}': {}", catalog.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Configuration(format!(
                "catalog.base_url '{}' cannot be a base URL",
                catalog.base_url
            )));
        }
        Ok(Self {
            base_url,
            client,
            tokens,
            auth,
            metrics,
        })
    }

    /// Wire the whole upstream stack from the service configuration.
    pub fn from_config(config: &ServiceConfig, metrics: Arc<Metrics>) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.settings.http_timeout_ms))
            .build()?;
        let auth = OAuth2Source::new(config.identity.clone(), client.clone())?;
        let tokens = TokenCache::new(
            get_token_safety_margin_seconds(config.settings.safety_margin_seconds),
            metrics.clone(),
        );
        Self::new(&config.catalog, client, tokens, auth, metrics)
    }

    pub fn tokens(&self) -> &TokenCache {
        &self.tokens
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    /// Bearer token for the commerce API, cached or freshly exchanged.
    pub async fn get_token(&self) -> ApiResult<String> {
        self.tokens.get_token(&self.auth).await
    }

    /// `{base_url}/{segments...}` with each segment percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Configuration("catalog.base_url cannot be a base URL".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn record_degraded(&self, operation: &str, reason: &ApiError) {
        warn!("{} degraded ({}): {}", operation, reason.kind(), reason);
        self.metrics
            .upstream_degraded
            .with_label_values(&[operation, reason.kind()])
            .inc();
    }
}
