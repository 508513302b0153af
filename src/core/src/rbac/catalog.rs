//! The permission catalog: the closed vocabulary of `resource:action` strings.
//!
//! Every permission the console knows about is declared exactly once in the
//! `permission_catalog!` invocation below. The enum, the symbolic names, the
//! wire strings and [`Permission::ALL`] are all generated from that single
//! list, so the catalog cannot drift from the values the role map derives
//! from it.
//!
//! Wire strings are shared with the REST backend and must stay stable across
//! releases.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AuthzError;

// ═══════════════════════════════════════════════════════════════════════════════
// Resource
// ═══════════════════════════════════════════════════════════════════════════════

/// The resource half of a permission string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    User,
    Tender,
    Bid,
    Organization,
    Vendor,
    Payment,
    Contract,
    Workflow,
    Admin,
}

impl Resource {
    /// Every resource, in catalog order.
    pub const ALL: &'static [Resource] = &[
        Resource::User,
        Resource::Tender,
        Resource::Bid,
        Resource::Organization,
        Resource::Vendor,
        Resource::Payment,
        Resource::Contract,
        Resource::Workflow,
        Resource::Admin,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Tender => "tender",
            Self::Bid => "bid",
            Self::Organization => "organization",
            Self::Vendor => "vendor",
            Self::Payment => "payment",
            Self::Contract => "contract",
            Self::Workflow => "workflow",
            Self::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.as_str() == s)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| AuthzError::UnknownResource(s.to_string()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Permission
// ═══════════════════════════════════════════════════════════════════════════════

/// Declares the catalog. Each entry is
/// `Variant => ("SYMBOLIC_NAME", "resource:action", Resource)`.
macro_rules! permission_catalog {
    ($( $(#[$meta:meta])* $variant:ident => ($name:literal, $value:literal, $resource:ident) ),* $(,)?) => {
        /// A single capability of the form `resource:action`.
        ///
        /// Serializes as its wire string (`"tender:publish"`).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum Permission {
            $( $(#[$meta])* $variant, )*
        }

        impl Permission {
            /// The complete catalog, in declaration order.
            pub const ALL: &'static [Permission] = &[ $( Permission::$variant, )* ];

            /// The wire string, e.g. `"tender:create"`.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Permission::$variant => $value, )*
                }
            }

            /// The symbolic constant name, e.g. `"TENDER_CREATE"`.
            pub const fn name(self) -> &'static str {
                match self {
                    $( Permission::$variant => $name, )*
                }
            }

            pub const fn resource(self) -> Resource {
                match self {
                    $( Permission::$variant => Resource::$resource, )*
                }
            }
        }
    };
}

permission_catalog! {
    UserCreate => ("USER_CREATE", "user:create", User),
    UserRead => ("USER_READ", "user:read", User),
    UserUpdate => ("USER_UPDATE", "user:update", User),
    UserDelete => ("USER_DELETE", "user:delete", User),

    TenderCreate => ("TENDER_CREATE", "tender:create", Tender),
    TenderRead => ("TENDER_READ", "tender:read", Tender),
    TenderUpdate => ("TENDER_UPDATE", "tender:update", Tender),
    TenderDelete => ("TENDER_DELETE", "tender:delete", Tender),
    TenderPublish => ("TENDER_PUBLISH", "tender:publish", Tender),
    TenderClose => ("TENDER_CLOSE", "tender:close", Tender),

    BidCreate => ("BID_CREATE", "bid:create", Bid),
    BidRead => ("BID_READ", "bid:read", Bid),
    BidUpdate => ("BID_UPDATE", "bid:update", Bid),
    BidDelete => ("BID_DELETE", "bid:delete", Bid),
    BidSubmit => ("BID_SUBMIT", "bid:submit", Bid),
    BidWithdraw => ("BID_WITHDRAW", "bid:withdraw", Bid),

    OrganizationCreate => ("ORGANIZATION_CREATE", "organization:create", Organization),
    OrganizationRead => ("ORGANIZATION_READ", "organization:read", Organization),
    OrganizationUpdate => ("ORGANIZATION_UPDATE", "organization:update", Organization),
    OrganizationDelete => ("ORGANIZATION_DELETE", "organization:delete", Organization),

    VendorCreate => ("VENDOR_CREATE", "vendor:create", Vendor),
    VendorRead => ("VENDOR_READ", "vendor:read", Vendor),
    VendorUpdate => ("VENDOR_UPDATE", "vendor:update", Vendor),
    VendorDelete => ("VENDOR_DELETE", "vendor:delete", Vendor),

    PaymentCreate => ("PAYMENT_CREATE", "payment:create", Payment),
    PaymentRead => ("PAYMENT_READ", "payment:read", Payment),
    PaymentUpdate => ("PAYMENT_UPDATE", "payment:update", Payment),
    PaymentProcess => ("PAYMENT_PROCESS", "payment:process", Payment),

    ContractCreate => ("CONTRACT_CREATE", "contract:create", Contract),
    ContractRead => ("CONTRACT_READ", "contract:read", Contract),
    ContractUpdate => ("CONTRACT_UPDATE", "contract:update", Contract),
    ContractSign => ("CONTRACT_SIGN", "contract:sign", Contract),

    WorkflowCreate => ("WORKFLOW_CREATE", "workflow:create", Workflow),
    WorkflowRead => ("WORKFLOW_READ", "workflow:read", Workflow),
    WorkflowUpdate => ("WORKFLOW_UPDATE", "workflow:update", Workflow),
    WorkflowApprove => ("WORKFLOW_APPROVE", "workflow:approve", Workflow),
    WorkflowReject => ("WORKFLOW_REJECT", "workflow:reject", Workflow),

    AdminDashboard => ("ADMIN_DASHBOARD", "admin:dashboard", Admin),
    AdminSettings => ("ADMIN_SETTINGS", "admin:settings", Admin),
    AdminUsers => ("ADMIN_USERS", "admin:users", Admin),
    AdminReports => ("ADMIN_REPORTS", "admin:reports", Admin),
}

impl Permission {
    /// The action half of the wire string, e.g. `"publish"`.
    pub fn action(self) -> &'static str {
        match self.as_str().split_once(':') {
            Some((_, action)) => action,
            None => "",
        }
    }

    /// Parse a wire string. Returns `None` for anything outside the catalog.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.as_str() == s)
    }

    /// Look up a permission by its symbolic name (`"TENDER_CREATE"`).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|p| p.name() == name)
    }

    /// Catalog entries belonging to one resource.
    pub fn for_resource(resource: Resource) -> impl Iterator<Item = Permission> {
        Self::ALL
            .iter()
            .copied()
            .filter(move |p| p.resource() == resource)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| AuthzError::UnknownPermission(s.to_string()))
    }
}

impl TryFrom<String> for Permission {
    type Error = AuthzError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Permission> for String {
    fn from(p: Permission) -> Self {
        p.as_str().to_string()
    }
}

impl AsRef<str> for Permission {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════
