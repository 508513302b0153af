//! The user record as the authorization layer sees it.
//!
//! Session payloads come from the backend's "current user" call and are held
//! client-side until logout. Only `roles` and `permissions` matter here; any
//! other fields are carried along untouched. Both lists are kept as raw
//! strings so a payload with a role or permission this build does not know
//! about still loads and simply grants nothing extra. Entries that are not
//! strings at all are dropped while loading.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::warn;

use super::catalog::Permission;
use super::roles::Role;

// ═══════════════════════════════════════════════════════════════════════════════
// Identifiers
// ═══════════════════════════════════════════════════════════════════════════════

/// Strongly-typed user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// User
// ═══════════════════════════════════════════════════════════════════════════════

/// Shown in logs and output for a user whose payload carries no id.
pub const UNKNOWN_USER_ID: &str = "unknown";

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Backend-issued id. Optional on the wire; it plays no part in checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,

    /// Role identifiers, e.g. `"VENDOR"`. Absent or null means none.
    #[serde(default, deserialize_with = "lenient_strings")]
    pub roles: Vec<String>,

    /// Directly granted permission strings, e.g. `"tender:read"`.
    #[serde(default, deserialize_with = "lenient_strings")]
    pub permissions: Vec<String>,

    /// Remaining session fields (email, name, organization, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Reads a role or permission list without failing on bad data. Null or a
/// non-list value yields an empty list, and non-string entries are skipped.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        other => {
            warn!(value = %other, "Ignoring malformed list in session user");
            return Ok(Vec::new());
        }
    };

    let mut strings = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(s) => strings.push(s),
            other => warn!(entry = %other, "Ignoring non-string entry in session user"),
        }
    }
    Ok(strings)
}

impl User {
    /// A user with no roles and no direct grants.
    pub fn new(id: impl Into<UserId>) -> Self {
        Self {
            id: Some(id.into()),
            roles: Vec::new(),
            permissions: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// A user without an id, as some session payloads arrive.
    pub fn without_id() -> Self {
        Self {
            id: None,
            roles: Vec::new(),
            permissions: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// The id for display, or [`UNKNOWN_USER_ID`] when the payload had none.
    pub fn display_id(&self) -> &str {
        self.id.as_ref().map_or(UNKNOWN_USER_ID, UserId::as_str)
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.push(role.as_str().to_string());
        self
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles
            .extend(roles.into_iter().map(|r| r.as_str().to_string()));
        self
    }

    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permissions.push(permission.as_str().to_string());
        self
    }

    /// Add a role identifier verbatim, whether or not it is a known role.
    pub fn with_raw_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    /// Add a permission string verbatim, whether or not it is in the catalog.
    pub fn with_raw_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.push(permission.into());
        self
    }

    /// Roles this build recognises, in payload order.
    pub fn known_roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.iter().filter_map(|r| Role::parse(r))
    }

    /// Role identifiers this build does not recognise.
    pub fn unknown_roles(&self) -> Vec<&str> {
        self.roles
            .iter()
            .map(String::as_str)
            .filter(|r| Role::parse(r).is_none())
            .collect()
    }

    /// Direct grants that are not catalog permissions.
    pub fn unknown_permissions(&self) -> Vec<&str> {
        self.permissions
            .iter()
            .map(String::as_str)
            .filter(|p| Permission::parse(p).is_none())
            .collect()
    }
}
