use std::path::Path;

use anyhow::{Context, Result};

use crate::config::proc_loader::file_to_config;
use crate::config::service::ServiceConfig;

pub fn run(config_path: &str) -> Result<ServiceConfig> {
    let path = Path::new(config_path);
    file_to_config(path).with_context(|| format!("invalid config {}", config_path))
}
