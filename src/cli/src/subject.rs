//! Resolving the user a command evaluates.
//!
//! In order of precedence: `--anonymous`, `--user FILE`, inline
//! `--role`/`--grant` flags, `session.user_file` from the configuration, and
//! finally the `user-file` key of the CLI config.

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;

use tenderdesk_core::config::Config;
use tenderdesk_core::rbac::{Permission, User};
use tenderdesk_core::session::{load_session, report_unrecognised, SessionSnapshot};

use crate::commands::config;

#[derive(Args, Debug, Default)]
pub struct SubjectArgs {
    /// Session snapshot file (JSON, YAML or TOML)
    #[arg(short, long)]
    pub user: Option<PathBuf>,

    /// Role to assign to an inline user (repeatable)
    #[arg(long = "role", value_name = "ROLE")]
    pub roles: Vec<String>,

    /// Permission to grant directly to an inline user (repeatable)
    #[arg(long = "grant", value_name = "PERMISSION")]
    pub grants: Vec<String>,

    /// Evaluate as a signed-out visitor
    #[arg(long, conflicts_with_all = ["user", "roles", "grants"])]
    pub anonymous: bool,
}

impl SubjectArgs {
    pub fn resolve(&self, settings: &Config) -> Result<SessionSnapshot> {
        if self.anonymous {
            return Ok(SessionSnapshot::signed_out());
        }

        if let Some(path) = &self.user {
            return load_session(path, &settings.session)
                .with_context(|| format!("Failed to load session from {}", path.display()));
        }

        if !self.roles.is_empty() || !self.grants.is_empty() {
            let mut user = User::new("cli");
            for role in &self.roles {
                user = user.with_raw_role(role.trim());
            }
            for grant in &self.grants {
                user = user.with_raw_permission(grant.trim());
            }
            let snapshot = SessionSnapshot::signed_in(user);
            if settings.session.warn_unknown_roles {
                report_unrecognised(&snapshot);
            }
            return Ok(snapshot);
        }

        let fallback = settings
            .session
            .user_file
            .clone()
            .or_else(config::load_user_file);

        match fallback {
            Some(path) => load_session(&path, &settings.session)
                .with_context(|| format!("Failed to load session from {}", path.display())),
            None => bail!(
                "No user given. Pass --user FILE, --role/--grant, --anonymous, \
                 or set a default with `tenderdesk config set user-file FILE`"
            ),
        }
    }
}

/// Parse a permission given either as its wire string (`tender:create`) or
/// its symbolic name (`TENDER_CREATE`).
pub fn parse_permission(raw: &str) -> Result<Permission> {
    let raw = raw.trim();
    Permission::parse(raw)
        .or_else(|| Permission::from_name(raw))
        .with_context(|| format!("'{}' is not a known permission; see `tenderdesk permissions list`", raw))
}
