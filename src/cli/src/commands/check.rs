//! Permission check command.
//!
//! Evaluates one or more permissions for a user. With several permissions the
//! verdict is "all of them" unless `--any` is given.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use tenderdesk_core::config::Config;
use tenderdesk_core::rbac::{
    explain, has_all_permissions, has_any_permission, GrantSource, Permission, PolicyDecision,
};

use crate::output::{self, OutputFormat};
use crate::subject::{parse_permission, SubjectArgs};

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub subject: SubjectArgs,

    /// Allow if any of the permissions is held
    #[arg(long, conflicts_with = "all")]
    pub any: bool,

    /// Allow only if every permission is held (default)
    #[arg(long)]
    pub all: bool,

    /// Permissions to check (e.g. tender:publish or TENDER_PUBLISH)
    #[arg(required = true, value_name = "PERMISSION")]
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Any,
    All,
}

#[derive(Debug, Serialize, Tabled)]
struct CheckRow {
    #[tabled(rename = "Permission")]
    permission: &'static str,
    #[tabled(rename = "Decision")]
    decision: &'static str,
    #[tabled(rename = "Detail")]
    detail: String,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    user: Option<String>,
    mode: Mode,
    allowed: bool,
    results: Vec<CheckRow>,
}

fn row(permission: Permission, decision: PolicyDecision) -> CheckRow {
    let (verdict, detail) = match decision {
        PolicyDecision::Allow(GrantSource::Direct) => ("allow", "granted directly".to_string()),
        PolicyDecision::Allow(GrantSource::Role(role)) => ("allow", format!("via role {}", role)),
        PolicyDecision::Deny(reason) => ("deny", reason),
    };
    CheckRow {
        permission: permission.as_str(),
        decision: verdict,
        detail,
    }
}

/// Returns whether the check passed.
pub fn execute(args: CheckArgs, settings: &Config, format: OutputFormat) -> Result<bool> {
    let permissions = args
        .permissions
        .iter()
        .map(|p| parse_permission(p))
        .collect::<Result<Vec<_>>>()?;

    let snapshot = args.subject.resolve(settings)?;
    let user = snapshot.user();

    let mode = if args.any { Mode::Any } else { Mode::All };
    let allowed = match mode {
        Mode::Any => has_any_permission(user, &permissions),
        Mode::All => has_all_permissions(user, &permissions),
    };

    let results: Vec<CheckRow> = permissions
        .iter()
        .map(|p| row(*p, explain(user, *p)))
        .collect();

    match format {
        OutputFormat::Table => {
            output::print_list(&results, format)?;
            let who = user.map_or("signed-out visitor".to_string(), |u| format!("user {}", u.display_id()));
            let scope = match mode {
                Mode::Any => "any of",
                Mode::All => "all of",
            };
            output::print_verdict(
                allowed,
                &format!("{} {} {} permission(s)", who, scope, permissions.len()),
            );
        }
        _ => {
            let report = CheckReport {
                user: user.map(|u| u.display_id().to_string()),
                mode,
                allowed,
                results,
            };
            output::print_item(&report, format)?;
        }
    }

    Ok(allowed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenderdesk_core::rbac::Role;

    fn args(roles: &[&str], any: bool, permissions: &[&str]) -> CheckArgs {
        CheckArgs {
            subject: SubjectArgs {
                roles: roles.iter().map(|r| r.to_string()).collect(),
                ..SubjectArgs::default()
            },
            any,
            all: !any,
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_all_mode() {
        let settings = Config::default();
        assert!(execute(args(&["VENDOR"], false, &["bid:submit", "bid:withdraw"]), &settings, OutputFormat::Json).unwrap());
        assert!(!execute(args(&["VENDOR"], false, &["bid:submit", "payment:process"]), &settings, OutputFormat::Json).unwrap());
    }

    #[test]
    fn test_any_mode() {
        let settings = Config::default();
        assert!(execute(args(&["VENDOR"], true, &["bid:submit", "payment:process"]), &settings, OutputFormat::Json).unwrap());
        assert!(!execute(args(&["USER"], true, &["bid:submit", "payment:process"]), &settings, OutputFormat::Json).unwrap());
    }

    #[test]
    fn test_unknown_permission_is_rejected() {
        let settings = Config::default();
        assert!(execute(args(&["VENDOR"], false, &["bid:teleport"]), &settings, OutputFormat::Json).is_err());
    }

    #[test]
    fn test_row_detail() {
        let r = row(Permission::BidSubmit, PolicyDecision::Allow(GrantSource::Role(Role::Vendor)));
        assert_eq!(r.decision, "allow");
        assert_eq!(r.detail, "via role VENDOR");
    }
}
