//! Tenderdesk CLI - inspect the role/permission model and evaluate users.
//!
//! Provides commands for the permission catalog, the role map, permission
//! checks against session snapshots, and CLI configuration.

mod commands;
mod output;
mod subject;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::process::ExitCode;

use commands::{check, config, permissions, roles, whoami};
use output::OutputFormat;
use subject::SubjectArgs;
use tenderdesk_core::config::Config;
use tenderdesk_core::telemetry;

/// Tenderdesk - procurement console authorization tool
#[derive(Parser)]
#[command(
    name = "tenderdesk",
    version,
    about = "Tenderdesk - procurement console authorization tool",
    long_about = "Inspect the permission catalog and role map, and check what a signed-in user may do.",
    propagate_version = true
)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "table")]
    output: OutputFormat,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short = 'c', long = "config", global = true, env = "TENDERDESK_CONFIG")]
    config_file: Option<String>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Permission catalog operations
    #[command(subcommand)]
    Permissions(permissions::PermissionCommands),

    /// Role map operations
    #[command(subcommand)]
    Roles(roles::RoleCommands),

    /// Check permissions for a user (exit code 2 when denied)
    Check(check::CheckArgs),

    /// Show a user's effective permissions
    Whoami(SubjectArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(config::ConfigCommands),
}

fn load_settings(cli: &Cli) -> Result<Config> {
    let mut settings = match &cli.config_file {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path))?,
        None => Config::load().context("Failed to load configuration from environment")?,
    };
    if let Some(level) = &cli.log_level {
        settings.logging.level = level.clone();
    }
    Ok(settings)
}

fn run(cli: Cli) -> Result<bool> {
    let settings = load_settings(&cli)?;
    telemetry::init_logging(&settings.logging).context("Failed to initialize logging")?;

    let format = cli.output;
    match cli.command {
        Commands::Permissions(cmd) => permissions::execute(cmd, format).map(|_| true),
        Commands::Roles(cmd) => roles::execute(cmd, format).map(|_| true),
        Commands::Check(args) => check::execute(args, &settings, format),
        Commands::Whoami(args) => whoami::execute(args, &settings, format).map(|_| true),
        Commands::Config(cmd) => config::execute(cmd, format).map(|_| true),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            output::print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
