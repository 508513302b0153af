//! Configuration management.
//!
//! Values come from an optional file and from `TENDERDESK__*` environment
//! variables, e.g. `TENDERDESK__LOGGING__LEVEL=debug` or
//! `TENDERDESK__SESSION__USER_FILE=/tmp/session.json`.

use serde::Deserialize;
use std::path::PathBuf;

use crate::error::Result;
use crate::telemetry::LoggingConfig;

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Session snapshot configuration
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Session snapshot to evaluate when none is given on the command line
    #[serde(default)]
    pub user_file: Option<PathBuf>,

    /// Log roles and permissions this build does not recognise
    #[serde(default = "default_warn_unknown_roles")]
    pub warn_unknown_roles: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_file: None,
            warn_unknown_roles: default_warn_unknown_roles(),
        }
    }
}

fn default_warn_unknown_roles() -> bool {
    true
}

impl Config {
    /// Load configuration from the environment.
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("TENDERDESK").separator("__"))
            .build()?;

        let cfg: Config = config.try_deserialize()?;
        Ok(cfg)
    }

    /// Load from a specific file path, with the environment layered on top.
    pub fn from_file(path: &str) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("TENDERDESK").separator("__"))
            .build()?;

        let cfg: Config = config.try_deserialize()?;
        Ok(cfg)
    }
}
