//! Permission catalog commands.

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use tenderdesk_core::rbac::{Permission, Resource, Role};

use crate::output::{self, OutputFormat};

#[derive(Subcommand)]
pub enum PermissionCommands {
    /// List the permission catalog
    List {
        /// Only show permissions for one resource (e.g. tender)
        #[arg(short, long)]
        resource: Option<Resource>,
    },
}

#[derive(Debug, Serialize, Tabled)]
pub struct PermissionRow {
    #[tabled(rename = "Name")]
    pub name: &'static str,
    #[tabled(rename = "Value")]
    pub value: &'static str,
    #[tabled(rename = "Resource")]
    pub resource: &'static str,
    #[tabled(rename = "Action")]
    pub action: &'static str,
    #[tabled(rename = "Granted By")]
    pub granted_by: String,
}

impl PermissionRow {
    pub fn from_permission(p: Permission) -> Self {
        let granted_by: Vec<&str> = Role::ALL
            .iter()
            .filter(|r| r.grants(p))
            .map(|r| r.as_str())
            .collect();

        Self {
            name: p.name(),
            value: p.as_str(),
            resource: p.resource().as_str(),
            action: p.action(),
            granted_by: granted_by.join(", "),
        }
    }
}

pub fn rows(resource: Option<Resource>) -> Vec<PermissionRow> {
    Permission::ALL
        .iter()
        .copied()
        .filter(|p| resource.map_or(true, |r| p.resource() == r))
        .map(PermissionRow::from_permission)
        .collect()
}

pub fn execute(cmd: PermissionCommands, format: OutputFormat) -> Result<()> {
    match cmd {
        PermissionCommands::List { resource } => output::print_list(&rows(resource), format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_cover_catalog() {
        assert_eq!(rows(None).len(), Permission::ALL.len());
    }

    #[test]
    fn test_rows_filtered_by_resource() {
        let payment = rows(Some(Resource::Payment));
        assert_eq!(payment.len(), 4);
        assert!(payment.iter().all(|r| r.resource == "payment"));
    }

    #[test]
    fn test_granted_by_lists_roles() {
        let row = PermissionRow::from_permission(Permission::PaymentProcess);
        assert_eq!(row.granted_by, "SUPER_ADMIN, FINANCE_OFFICER");

        let row = PermissionRow::from_permission(Permission::AdminSettings);
        assert_eq!(row.granted_by, "SUPER_ADMIN, ADMIN");
    }
}
