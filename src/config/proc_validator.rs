//! Configuration validation with aggregated errors.
//! - Aggregates all issues into Vec<String>
//! - Credentials and scope must be present (fail fast, never degraded)
//! - Endpoint URLs must be absolute http(s) URLs
//! - Page size bounds, server address, logging level

use reqwest::Url;
use tracing::{error, info};

use crate::config::service::{CatalogConfig, ContactConfig, IdentityConfig, ServiceConfig};
use crate::config::settings::SettingsConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_settings(&cfg.settings, &mut errors);
    validate_identity(&cfg.identity, &mut errors);
    validate_catalog(&cfg.catalog, &mut errors);
    if let Some(contact) = &cfg.contact {
        validate_contact(contact, &mut errors);
    }

    if errors.is_empty() {
        info!("config validation passed");
        Ok(())
    } else {
        for e in &errors {
            error!("config validation: {}", e);
        }
        Err(errors)
    }
}

fn validate_settings(settings: &SettingsConfig, errors: &mut Vec<String>) {
    if settings.http_timeout_ms == 0 {
        errors.push("settings.http_timeout_ms must be > 0".to_string());
    }
    if settings.server.host.trim().is_empty() {
        errors.push("settings.server.host must not be empty".to_string());
    }
    if settings.server.port.parse::<u16>().is_err() {
        errors.push(format!(
            "settings.server.port '{}' is not a valid port",
            settings.server.port
        ));
    }
    if settings.metrics.is_enabled && !settings.metrics.path.starts_with('/') {
        errors.push(format!(
            "settings.metrics.path '{}' must start with '/'",
            settings.metrics.path
        ));
    }
    if let Some(logging) = &settings.logging {
        let level = logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            errors.push(format!(
                "settings.logging.level '{}' must be one of {:?}",
                logging.level, LOG_LEVELS
            ));
        }
    }
}

/// Missing credentials are a configuration error, not a runtime condition.
pub fn validate_identity(identity: &IdentityConfig, errors: &mut Vec<String>) {
    let required = [
        ("identity.tenant_id", &identity.tenant_id),
        ("identity.client_id", &identity.client_id),
        ("identity.client_secret", &identity.client_secret),
        ("identity.scope", &identity.scope),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(format!("{} is required", field));
        }
    }
    validate_http_url("identity.authority_url", &identity.authority_url, errors);
}

fn validate_catalog(catalog: &CatalogConfig, errors: &mut Vec<String>) {
    validate_http_url("catalog.base_url", &catalog.base_url, errors);
    if catalog.default_page_size == 0 {
        errors.push("catalog.default_page_size must be >= 1".to_string());
    }
    if catalog.max_page_size < catalog.default_page_size {
        errors.push(format!(
            "catalog.max_page_size ({}) must be >= catalog.default_page_size ({})",
            catalog.max_page_size, catalog.default_page_size
        ));
    }
}

fn validate_contact(contact: &ContactConfig, errors: &mut Vec<String>) {
    if contact.recipient.trim().is_empty() {
        errors.push("contact.recipient must not be empty".to_string());
    }
    if let Some(url) = contact.relay_url() {
        validate_http_url("contact.relay_url", url, errors);
    }
}

fn validate_http_url(field: &str, value: &str, errors: &mut Vec<String>) {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base() => {}
        Ok(url) => errors.push(format!(
            "{} '{}' must be an absolute http(s) URL (scheme '{}')",
            field,
            value,
            url.scheme()
        )),
        Err(e) => errors.push(format!("{} '{}' is not a valid URL: {}", field, value, e)),
    }
}
