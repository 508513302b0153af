//! Role map commands.

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use tenderdesk_core::rbac::Role;

use super::permissions::PermissionRow;
use crate::output::{self, OutputFormat};

#[derive(Subcommand)]
pub enum RoleCommands {
    /// List built-in roles
    List,

    /// Show the permissions a role grants
    Show {
        /// Role identifier (e.g. VENDOR)
        role: Role,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct RoleRow {
    #[tabled(rename = "Role")]
    role: &'static str,
    #[tabled(rename = "Description")]
    description: &'static str,
    #[tabled(rename = "Permissions")]
    permissions: usize,
}

#[derive(Debug, Serialize)]
struct RoleDetail {
    role: Role,
    description: &'static str,
    permissions: Vec<&'static str>,
}

pub fn execute(cmd: RoleCommands, format: OutputFormat) -> Result<()> {
    match cmd {
        RoleCommands::List => {
            let rows: Vec<RoleRow> = Role::ALL
                .iter()
                .map(|r| RoleRow {
                    role: r.as_str(),
                    description: r.description(),
                    permissions: r.permissions().len(),
                })
                .collect();

            output::print_list(&rows, format)?;
        }

        RoleCommands::Show { role } => match format {
            OutputFormat::Table => {
                output::print_header(&format!("Role: {}", role));
                output::print_detail("Description", role.description());
                output::print_detail("Permissions", &role.permissions().len().to_string());
                println!();

                let rows: Vec<PermissionRow> = role
                    .permissions()
                    .iter()
                    .copied()
                    .map(PermissionRow::from_permission)
                    .collect();
                output::print_list(&rows, format)?;
            }
            _ => {
                let detail = RoleDetail {
                    role,
                    description: role.description(),
                    permissions: role.permissions().iter().map(|p| p.as_str()).collect(),
                };
                output::print_item(&detail, format)?;
            }
        },
    }

    Ok(())
}
