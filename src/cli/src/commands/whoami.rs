//! Effective permissions of a user.

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;

use tenderdesk_core::config::Config;
use tenderdesk_core::rbac::{
    can_access_admin, get_user_permissions, is_admin, is_super_admin, Permission, User,
};

use crate::output::{self, OutputFormat};
use crate::subject::SubjectArgs;

#[derive(Debug, Serialize, Tabled)]
struct EffectiveRow {
    #[tabled(rename = "Permission")]
    permission: &'static str,
    #[tabled(rename = "Source")]
    source: &'static str,
}

#[derive(Debug, Serialize)]
struct Profile {
    user: Option<String>,
    roles: Vec<String>,
    unknown_roles: Vec<String>,
    is_admin: bool,
    is_super_admin: bool,
    can_access_admin: bool,
    permissions: Vec<&'static str>,
}

fn effective_rows(user: Option<&User>) -> Vec<EffectiveRow> {
    let mut granted: Vec<Permission> = get_user_permissions(user).into_iter().collect();
    granted.sort();

    granted
        .into_iter()
        .map(|p| {
            let direct = user.is_some_and(|u| u.permissions.iter().any(|d| d == p.as_str()));
            EffectiveRow {
                permission: p.as_str(),
                source: if direct { "direct" } else { "role" },
            }
        })
        .collect()
}

pub fn execute(args: SubjectArgs, settings: &Config, format: OutputFormat) -> Result<()> {
    let snapshot = args.resolve(settings)?;
    let user = snapshot.user();
    let rows = effective_rows(user);

    match format {
        OutputFormat::Table => {
            match user {
                Some(u) => {
                    output::print_header(&format!("User: {}", u.display_id()));
                    output::print_detail("Roles", &u.roles.join(", "));
                    let unknown = u.unknown_roles();
                    if !unknown.is_empty() {
                        output::print_detail("Unknown Roles", &unknown.join(", "));
                    }
                }
                None => output::print_header("Signed-out visitor"),
            }
            output::print_detail("Admin", &output::yes_no(is_admin(user)));
            output::print_detail("Super Admin", &output::yes_no(is_super_admin(user)));
            output::print_detail("Admin Console", &output::yes_no(can_access_admin(user)));
            output::print_detail("Permissions", &rows.len().to_string());
            println!();
            output::print_list(&rows, format)?;
        }
        _ => {
            let profile = Profile {
                user: user.map(|u| u.display_id().to_string()),
                roles: user.map(|u| u.roles.clone()).unwrap_or_default(),
                unknown_roles: user
                    .map(|u| u.unknown_roles().into_iter().map(String::from).collect())
                    .unwrap_or_default(),
                is_admin: is_admin(user),
                is_super_admin: is_super_admin(user),
                can_access_admin: can_access_admin(user),
                permissions: rows.iter().map(|r| r.permission).collect(),
            };
            output::print_item(&profile, format)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tenderdesk_core::rbac::Role;

    #[test]
    fn test_effective_rows_mark_direct_grants() {
        let user = User::new("u")
            .with_role(Role::Vendor)
            .with_permission(Permission::TenderRead)
            .with_permission(Permission::PaymentProcess);
        let rows = effective_rows(Some(&user));

        assert_eq!(rows.len(), Role::Vendor.permissions().len() + 1);
        let source = |v: &str| rows.iter().find(|r| r.permission == v).map(|r| r.source);
        assert_eq!(source("payment:process"), Some("direct"));
        assert_eq!(source("tender:read"), Some("direct"));
        assert_eq!(source("bid:submit"), Some("role"));
    }

    #[test]
    fn test_signed_out_has_no_rows() {
        assert!(effective_rows(None).is_empty());
    }
}
