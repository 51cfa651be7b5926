use anyhow::{Context, Result};
use clap::Parser;
use kahramani_catalog::catalog::CatalogClient;
use kahramani_catalog::contact::ContactService;
use kahramani_catalog::observability::metrics::Metrics;
use kahramani_catalog::server::server::{self, AppState, PagingConfig};
use kahramani_catalog::utils::config_loader;
use kahramani_catalog::utils::logging::{self, LogLevel};
use reqwest::Client;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "kahramani-catalog.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // -------------------------------
    // 1. Load YAML config, fail fast on missing credentials
    // -------------------------------

    let service_config = config_loader::run(&args.config)?;
    logging::run(&service_config, args.log_level);

    // -------------------------------
    // 2. Metrics registry
    // -------------------------------

    let metrics = Metrics::new().context("failed to build metrics registry")?;

    // -------------------------------
    // 3. Upstream clients: token cache, identity provider, commerce API
    // -------------------------------

    let catalog = CatalogClient::from_config(&service_config, metrics.clone())
        .context("failed to build catalog client")?;

    let relay_client = Client::builder()
        .timeout(Duration::from_millis(service_config.settings.http_timeout_ms))
        .build()
        .context("failed to build relay client")?;
    let contact = ContactService::from_config(service_config.contact.as_ref(), relay_client, metrics.clone());

    // -------------------------------
    // 4. HTTP server
    // -------------------------------

    let state = AppState::new(
        catalog,
        contact,
        PagingConfig::from(&service_config.catalog),
        &metrics,
    );
    info!("Service starting...");
    server::start(&service_config.settings, state, &metrics).await
}
