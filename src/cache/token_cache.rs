use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::cache::token::CachedToken;
use crate::error::ApiResult;
use crate::helpers::time::now_i64;
use crate::observability::metrics::Metrics;
use crate::sources::ExchangeCredentials;

/// Single-slot bearer token cache shared by every upstream call.
///
/// Owned by the application and handed to the clients that need a token.
/// Concurrent first callers share one exchange: the refresh lock is taken
/// only when the slot is empty or stale, and the slot is re-checked once
/// the lock is held.
#[derive(Debug, Clone)]
pub struct TokenCache {
    slot: Arc<RwLock<Option<CachedToken>>>,
    refresh: Arc<Mutex<()>>,
    safety_margin_seconds: u64,
    metrics: Arc<Metrics>,
}

impl TokenCache {
    pub fn new(safety_margin_seconds: u64, metrics: Arc<Metrics>) -> Self {
        Self {
            slot: Arc::new(RwLock::new(None)),
            refresh: Arc::new(Mutex::new(())),
            safety_margin_seconds,
            metrics,
        }
    }

    pub fn safety_margin_seconds(&self) -> u64 {
        self.safety_margin_seconds
    }

    /// Replace the slot as a whole.
    pub async fn set(&self, token: CachedToken) {
        *self.slot.write().await = Some(token);
    }

    /// Token if present and not yet expired
    pub async fn get(&self) -> Option<CachedToken> {
        let now = now_i64();
        self.slot
            .read()
            .await
            .as_ref()
            .filter(|token| token.is_valid_at(now))
            .cloned()
    }

    /// Raw slot content, stale or not
    pub async fn peek(&self) -> Option<CachedToken> {
        self.slot.read().await.clone()
    }

    /// Serve the cached token or run one exchange through `source`.
    ///
    /// A failed exchange leaves the slot untouched and the error reaches
    /// the caller. No retry.
    pub async fn get_token<S>(&self, source: &S) -> ApiResult<String>
    where
        S: ExchangeCredentials + Sync,
    {
        if let Some(token) = self.get().await {
            debug!("token cache hit, expires at {}", token.expires_at);
            self.metrics.token_cache_hits.inc();
            return Ok(token.value);
        }

        let _refresh = self.refresh.lock().await;
        if let Some(token) = self.get().await {
            debug!("token refreshed by a concurrent caller");
            self.metrics.token_cache_hits.inc();
            return Ok(token.value);
        }

        info!("no valid cached token, exchanging client credentials");
        let issued = match source.exchange_credentials().await {
            Ok(issued) => issued,
            Err(err) => {
                self.metrics
                    .token_exchanges
                    .with_label_values(&[err.kind()])
                    .inc();
                return Err(err);
            }
        };
        self.metrics.token_exchanges.with_label_values(&["ok"]).inc();

        let token = CachedToken::from_issued(issued, now_i64(), self.safety_margin_seconds);
        info!("token cached until {}", token.expires_at);
        self.set(token.clone()).await;
        Ok(token.value)
    }
}
