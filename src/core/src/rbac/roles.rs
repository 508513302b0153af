//! Built-in roles and the permissions each one grants.
//!
//! | Role                | Grants                                                      |
//! |---------------------|-------------------------------------------------------------|
//! | SUPER_ADMIN         | The whole catalog, derived from [`Permission::ALL`]          |
//! | ADMIN               | User, organization and vendor management; tender lifecycle; admin console |
//! | PROCUREMENT_OFFICER | Tender lifecycle, bid review, contracts, workflow authoring |
//! | VENDOR              | Bidding, own vendor profile, contract signing               |
//! | FINANCE_OFFICER     | Payments, workflow approval, reports                        |
//! | AUDITOR             | Read-only on every resource, reports                        |
//! | USER                | Public tender, organization and vendor listings             |
//!
//! Non-super roles are whitelists. A permission added to the catalog is granted
//! to SUPER_ADMIN automatically and to nobody else until it is listed here.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use super::catalog::Permission;
use crate::error::AuthzError;

use Permission::*;

const ADMIN_PERMISSIONS: &[Permission] = &[
    UserCreate,
    UserRead,
    UserUpdate,
    UserDelete,
    TenderCreate,
    TenderRead,
    TenderUpdate,
    TenderDelete,
    TenderPublish,
    TenderClose,
    BidRead,
    OrganizationCreate,
    OrganizationRead,
    OrganizationUpdate,
    OrganizationDelete,
    VendorCreate,
    VendorRead,
    VendorUpdate,
    VendorDelete,
    PaymentRead,
    ContractRead,
    WorkflowRead,
    WorkflowApprove,
    WorkflowReject,
    AdminDashboard,
    AdminSettings,
    AdminUsers,
    AdminReports,
];

const PROCUREMENT_OFFICER_PERMISSIONS: &[Permission] = &[
    TenderCreate,
    TenderRead,
    TenderUpdate,
    TenderDelete,
    TenderPublish,
    TenderClose,
    BidRead,
    BidUpdate,
    OrganizationRead,
    VendorRead,
    VendorUpdate,
    ContractCreate,
    ContractRead,
    ContractUpdate,
    WorkflowCreate,
    WorkflowRead,
    WorkflowUpdate,
    AdminReports,
];

const VENDOR_PERMISSIONS: &[Permission] = &[
    TenderRead,
    BidCreate,
    BidRead,
    BidUpdate,
    BidDelete,
    BidSubmit,
    BidWithdraw,
    OrganizationRead,
    VendorRead,
    VendorUpdate,
    PaymentRead,
    ContractRead,
    ContractSign,
];

const FINANCE_OFFICER_PERMISSIONS: &[Permission] = &[
    TenderRead,
    BidRead,
    PaymentCreate,
    PaymentRead,
    PaymentUpdate,
    PaymentProcess,
    ContractRead,
    WorkflowRead,
    WorkflowApprove,
    WorkflowReject,
    AdminReports,
];

const AUDITOR_PERMISSIONS: &[Permission] = &[
    UserRead,
    TenderRead,
    BidRead,
    OrganizationRead,
    VendorRead,
    PaymentRead,
    ContractRead,
    WorkflowRead,
    AdminReports,
];

const USER_PERMISSIONS: &[Permission] = &[TenderRead, OrganizationRead, VendorRead];

/// Built-in role identifiers. Serialized as `SUPER_ADMIN`, `VENDOR`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    Admin,
    ProcurementOfficer,
    Vendor,
    FinanceOfficer,
    Auditor,
    User,
}

impl Role {
    /// Every role, most privileged first.
    pub const ALL: &'static [Role] = &[
        Role::SuperAdmin,
        Role::Admin,
        Role::ProcurementOfficer,
        Role::Vendor,
        Role::FinanceOfficer,
        Role::Auditor,
        Role::User,
    ];

    /// The role identifier as it appears in session payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "SUPER_ADMIN",
            Self::Admin => "ADMIN",
            Self::ProcurementOfficer => "PROCUREMENT_OFFICER",
            Self::Vendor => "VENDOR",
            Self::FinanceOfficer => "FINANCE_OFFICER",
            Self::Auditor => "AUDITOR",
            Self::User => "USER",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::SuperAdmin => "Every permission in the catalog",
            Self::Admin => "Manage users, organizations, vendors and the tender lifecycle",
            Self::ProcurementOfficer => "Run tenders, review bids, draft contracts and workflows",
            Self::Vendor => "Browse tenders, submit bids and sign awarded contracts",
            Self::FinanceOfficer => "Process payments and approve financial workflows",
            Self::Auditor => "Read-only access to every resource and reports",
            Self::User => "Browse published tenders and directories",
        }
    }

    /// Permissions granted by this role.
    pub const fn permissions(self) -> &'static [Permission] {
        match self {
            Self::SuperAdmin => Permission::ALL,
            Self::Admin => ADMIN_PERMISSIONS,
            Self::ProcurementOfficer => PROCUREMENT_OFFICER_PERMISSIONS,
            Self::Vendor => VENDOR_PERMISSIONS,
            Self::FinanceOfficer => FINANCE_OFFICER_PERMISSIONS,
            Self::Auditor => AUDITOR_PERMISSIONS,
            Self::User => USER_PERMISSIONS,
        }
    }

    /// Permissions granted by this role, as a set.
    pub fn permission_set(self) -> HashSet<Permission> {
        self.permissions().iter().copied().collect()
    }

    pub fn grants(self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.as_str() == s)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| AuthzError::UnknownRole(s.to_string()))
    }
}

/// Permissions for a raw role identifier. Unknown identifiers grant nothing.
pub fn role_permissions(role: &str) -> &'static [Permission] {
    match Role::parse(role) {
        Some(role) => role.permissions(),
        None => &[],
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
