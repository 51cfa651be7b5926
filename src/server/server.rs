use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use tracing::info;

use crate::catalog::CatalogClient;
use crate::config::service::CatalogConfig;
use crate::config::settings::SettingsConfig;
use crate::contact::relay::WebhookRelay;
use crate::contact::ContactService;
use crate::observability::metrics::Metrics;
use crate::observability::routes::MetricsState;
use crate::server::handlers;

/// Page size bounds enforced by the HTTP boundary.
#[derive(Debug, Clone, Copy)]
pub struct PagingConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl From<&CatalogConfig> for PagingConfig {
    fn from(catalog: &CatalogConfig) -> Self {
        Self {
            default_page_size: catalog.default_page_size,
            max_page_size: catalog.max_page_size,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogClient>,
    pub contact: Arc<ContactService<WebhookRelay>>,
    pub paging: PagingConfig,
    pub metrics_state: MetricsState,
}

impl AppState {
    pub fn new(
        catalog: CatalogClient,
        contact: ContactService<WebhookRelay>,
        paging: PagingConfig,
        metrics: &Metrics,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            contact: Arc::new(contact),
            paging,
            metrics_state: MetricsState::new(metrics.registry.clone()),
        }
    }
}

pub fn router(state: AppState, settings_config: &SettingsConfig) -> Router {
    Router::new()
        .route("/api/products", get(handlers::list_products))
        .route("/api/product-images", get(handlers::missing_product_id))
        .route("/api/product-images/", get(handlers::missing_product_id))
        .route("/api/product-images/{product_id}", get(handlers::list_product_images))
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/contact", post(handlers::submit_contact))
        .merge(state.metrics_state.router(&settings_config.metrics))
        .with_state(state)
}

/// Bind and serve until ctrl-c / SIGTERM.
pub async fn start(settings_config: &SettingsConfig, state: AppState, metrics: &Metrics) -> Result<()> {
    let app = router(state, settings_config);

    let bind_addr = format!("{}:{}", settings_config.server.host, settings_config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("listening on {}", bind_addr);
    metrics.up.set(1);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server failed")?;

    metrics.up.set(0);
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutting down gracefully");
}
