//! Structured logging with JSON, pretty and compact formats.
//!
//! - JSON format for machine consumption
//! - Pretty format for interactive use
//! - Per-module log level configuration
//! - `RUST_LOG` takes precedence over the configured level

use serde::Deserialize;
use std::collections::BTreeMap;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Global log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty or compact)
    #[serde(default)]
    pub format: LogFormat,

    /// Per-module log levels
    #[serde(default)]
    pub module_levels: BTreeMap<String, String>,

    /// Whether to include target (module path)
    #[serde(default = "default_include_target")]
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            module_levels: BTreeMap::new(),
            include_target: default_include_target(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format for structured logging
    Json,
    /// Multi-line human-readable format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_include_target() -> bool {
    true
}

/// Build the filter directive string from the configuration, e.g.
/// `"warn,tenderdesk_core::session=debug"`.
pub fn filter_directive(config: &LoggingConfig) -> String {
    let mut directive = config.level.clone();
    for (module, level) in &config.module_levels {
        directive.push_str(&format!(",{}={}", module, level));
    }
    directive
}

/// Build the environment filter. `RUST_LOG`, when set, wins over the config.
pub fn build_filter(config: &LoggingConfig) -> anyhow::Result<EnvFilter> {
    match std::env::var("RUST_LOG") {
        Ok(env) if !env.trim().is_empty() => Ok(EnvFilter::try_new(env)?),
        _ => Ok(EnvFilter::try_new(filter_directive(config))?),
    }
}

/// Initialize the global tracing subscriber. Logs go to stderr so command
/// output on stdout stays machine-readable.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = build_filter(config)?;

    match config.format {
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(config.include_target);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .pretty()
                .with_writer(std::io::stderr)
                .with_target(config.include_target);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Compact => {
            let fmt_layer = fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(config.include_target);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    tracing::debug!(level = %config.level, format = ?config.format, "Logging initialized");
    Ok(())
}
