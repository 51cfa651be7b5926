use std::sync::Arc;

use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use tracing::info;

/// Application owned metrics registry.
#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Token metrics
    pub token_exchanges: IntCounterVec,
    pub token_cache_hits: IntCounter,

    // Upstream metrics
    pub upstream_requests: IntCounterVec,
    pub upstream_degraded: IntCounterVec,
    pub upstream_duration: HistogramVec,

    // Contact metrics
    pub contact_submissions: IntCounterVec,

    pub up: IntGauge,
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics").finish_non_exhaustive()
    }
}

impl Metrics {
    pub fn new() -> prometheus::Result<Arc<Self>> {
        info!("Initializing Metrics ...");
        let registry = Registry::new_custom(Some("kahramani".into()), None)?;

        let metrics = Arc::new(Self {
            // Token
            token_exchanges: IntCounterVec::new(Opts::new("token_exchanges_total", "Client credential exchanges by outcome"), &["outcome"])?,
            token_cache_hits: IntCounter::new("token_cache_hits_total", "Requests served by the cached token")?,

            // Upstream
            upstream_requests: IntCounterVec::new(Opts::new("upstream_requests_total", "Commerce API requests by operation"), &["operation"])?,
            upstream_degraded: IntCounterVec::new(Opts::new("upstream_degraded_total", "Degraded results by operation and reason"), &["operation", "reason"])?,
            upstream_duration: HistogramVec::new(HistogramOpts::new("upstream_duration_seconds", "Commerce API request duration seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]), &["operation"])?,

            // Contact
            contact_submissions: IntCounterVec::new(Opts::new("contact_submissions_total", "Contact form submissions by outcome"), &["outcome"])?,

            up: IntGauge::new("up", "1 if service is healthy")?,

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.token_exchanges.clone()))?;
        reg.register(Box::new(metrics.token_cache_hits.clone()))?;
        reg.register(Box::new(metrics.upstream_requests.clone()))?;
        reg.register(Box::new(metrics.upstream_degraded.clone()))?;
        reg.register(Box::new(metrics.upstream_duration.clone()))?;
        reg.register(Box::new(metrics.contact_submissions.clone()))?;
        reg.register(Box::new(metrics.up.clone()))?;

        Ok(metrics)
    }
}
