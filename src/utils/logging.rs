use clap::ValueEnum;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::config::service::ServiceConfig;
use crate::config::settings::{LogFormat, LoggingConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    TRACE,
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match *self {
            LogLevel::TRACE => "trace",
            LogLevel::DEBUG => "debug",
            LogLevel::INFO => "info",
            LogLevel::WARN => "warn",
            LogLevel::ERROR => "error",
        }
    }
}

/// Command line level wins over the configured one.
pub fn resolve(service_config: &ServiceConfig, arg_log_level: Option<LogLevel>) -> LoggingConfig {
    let configured = service_config.settings.logging.as_ref();
    let level = arg_log_level
        .map(|level| level.as_str().to_string())
        .or_else(|| configured.map(|config| config.level.to_owned()))
        .unwrap_or_else(|| "info".to_owned());
    let format = configured
        .map(|config| config.format.to_owned())
        .unwrap_or(LogFormat::Compact);
    LoggingConfig::new(level, format)
}

pub fn run(service_config: &ServiceConfig, arg_log_level: Option<LogLevel>) {
    init_logging(&resolve(service_config, arg_log_level));
}

type FormatLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// json for log collectors, compact with colours for a terminal
fn format_layer(format: &LogFormat) -> FormatLayer {
    let timer = UtcTime::rfc_3339();
    match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_timer(timer)
            .flatten_event(true)
            .with_ansi(false)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_timer(timer).with_ansi(true).boxed(),
    }
}

fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber; a second call keeps the first one.
pub fn init_logging(cfg: &LoggingConfig) {
    let installed = tracing_subscriber::registry()
        .with(format_layer(&cfg.format))
        .with(level_filter(&cfg.level))
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed, keeping it");
    }
}
