use std::{fs, path::Path};

use anyhow::{anyhow, Context, Result};
use regex::Regex;
use tracing::{debug, error};

use crate::config::proc_validator;
use crate::config::service::ServiceConfig;
use crate::config::settings::{LogFormat, LoggingConfig};
use crate::utils::constants::DEFAULT_SAFETY_MARGIN_SECS;

/// Load and validate config from YAML file
pub fn file_to_config(path: &Path) -> Result<ServiceConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;

    let expanded = expand_env_vars(&content)?;
    parse_config(&expanded)
}

pub fn parse_config(content: &str) -> Result<ServiceConfig> {
    let mut service_config: ServiceConfig = serde_yaml::from_str(content)
        .inspect_err(|e| error!("parse config error: {}", e))?;

    // Apply defaults
    if service_config.settings.logging.is_none() {
        service_config.settings.logging = Some(LoggingConfig::new("info".to_owned(), LogFormat::Compact));
    }
    if service_config.settings.safety_margin_seconds.is_none() {
        service_config.settings.safety_margin_seconds = Some(DEFAULT_SAFETY_MARGIN_SECS);
    }

    debug!("validation config ...");
    proc_validator::validate_service_config(&service_config).map_err(|errors| {
        anyhow!("configuration error: {}", errors.join("; "))
    })?;

    Ok(service_config)
}

/// Replace `${VAR}` and `${VAR:default}` with environment values.
pub fn expand_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]*))?\}")?;
    let expanded = re.replace_all(input, |caps: &regex::Captures<'_>| {
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(&caps[1]).unwrap_or_else(|_| default.to_string())
    });
    Ok(expanded.into_owned())
}
