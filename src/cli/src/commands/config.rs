//! Configuration management commands.
//!
//! Stores CLI defaults in `~/.tenderdesk/config.toml`. The only key the other
//! commands read is `user-file`, the session snapshot used when no subject is
//! given on the command line.

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::output::{self, OutputFormat};

pub const USER_FILE_KEY: &str = "user-file";

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., user-file)
        key: String,
        /// Value to set
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Show all configuration
    Show,

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Persistent CLI configuration stored on disk.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".tenderdesk").join("config.toml"))
}

fn read_config(path: &Path) -> Result<CliConfig> {
    if !path.exists() {
        return Ok(CliConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn write_config(path: &Path, cfg: &CliConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = toml::to_string_pretty(cfg).context("Failed to serialize config")?;
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn get_value<'a>(cfg: &'a CliConfig, key: &str) -> Result<&'a String> {
    cfg.values
        .get(key)
        .with_context(|| format!("Key '{}' not found", key))
}

/// The `user-file` default, if one has been set.
pub fn load_user_file() -> Option<PathBuf> {
    let path = config_path().ok()?;
    read_config(&path)
        .ok()
        .and_then(|cfg| cfg.values.get(USER_FILE_KEY).map(PathBuf::from))
}

pub fn execute(cmd: ConfigCommands, format: OutputFormat) -> Result<()> {
    let path = config_path()?;

    match cmd {
        ConfigCommands::Set { key, value } => {
            let mut cfg = read_config(&path)?;
            cfg.values.insert(key.clone(), value.clone());
            write_config(&path, &cfg)?;

            match format {
                OutputFormat::Table => output::print_success(&format!("{} = {}", key, value)),
                _ => output::print_item(
                    &serde_json::json!({ "key": key, "value": value }),
                    format,
                )?,
            }
        }

        ConfigCommands::Get { key } => {
            let cfg = read_config(&path)?;
            let value = get_value(&cfg, &key)?;
            match format {
                OutputFormat::Table => println!("{}", value),
                _ => output::print_item(
                    &serde_json::json!({ "key": key, "value": value }),
                    format,
                )?,
            }
        }

        ConfigCommands::Show => {
            let cfg = read_config(&path)?;

            if cfg.values.is_empty() {
                output::print_info("No configuration values set.");
                return Ok(());
            }

            match format {
                OutputFormat::Table => {
                    output::print_header("Configuration");
                    for (k, v) in &cfg.values {
                        output::print_detail(k, v);
                    }
                }
                _ => output::print_item(&cfg.values, format)?,
            }
        }

        ConfigCommands::Reset { force } => {
            if !force {
                output::print_info(
                    "This will reset all CLI configuration. Use --force to confirm.",
                );
                return Ok(());
            }

            if path.exists() {
                std::fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove {}", path.display()))?;
            }

            output::print_success("Configuration reset to defaults");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = read_config(&dir.path().join("config.toml")).unwrap();
        assert!(cfg.values.is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = CliConfig::default();
        cfg.values
            .insert(USER_FILE_KEY.to_string(), "/tmp/session.json".to_string());
        write_config(&path, &cfg).unwrap();

        assert_eq!(read_config(&path).unwrap(), cfg);
    }

    #[test]
    fn test_get_missing_key_is_error() {
        let mut cfg = CliConfig::default();
        cfg.values
            .insert(USER_FILE_KEY.to_string(), "/tmp/session.json".to_string());

        assert_eq!(get_value(&cfg, USER_FILE_KEY).unwrap(), "/tmp/session.json");
        let err = get_value(&cfg, "no-such-key").unwrap_err();
        assert_eq!(err.to_string(), "Key 'no-such-key' not found");
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "values = [").unwrap();
        assert!(read_config(&path).is_err());
    }
}
