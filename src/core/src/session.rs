//! Session snapshots: the client-side copy of "who is signed in".
//!
//! A snapshot is what the auth layer stores after the login or
//! "get current user" call: `{ "user": { ... } }`, with `"user": null` (or no
//! `user` key) once signed out. Snapshots can be read from JSON, YAML or TOML.
//!
//! Unrecognised roles and permissions are reported here, at load time, and
//! never by the evaluator: a role this build does not know usually means the
//! backend is newer than the console.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::config::SessionConfig;
use crate::error::{AuthzError, Result};
use crate::rbac::User;

/// Supported snapshot encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
    Toml,
}

impl SnapshotFormat {
    /// Pick a format from a file extension. Anything unrecognised is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// The persisted session state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default)]
    pub user: Option<User>,
}

impl SessionSnapshot {
    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn signed_out() -> Self {
        Self { user: None }
    }

    /// The user, in the shape the evaluator takes.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Parse a snapshot from text in the given format.
    pub fn parse(content: &str, format: SnapshotFormat) -> Result<Self> {
        let snapshot: Self = match format {
            SnapshotFormat::Json => serde_json::from_str(content)?,
            SnapshotFormat::Yaml => serde_yaml::from_str(content)?,
            SnapshotFormat::Toml => toml::from_str(content)?,
        };
        Ok(snapshot)
    }
}

/// Parse a JSON snapshot.
pub fn parse_session_json(content: &str) -> Result<SessionSnapshot> {
    SessionSnapshot::parse(content, SnapshotFormat::Json)
}

/// Read a snapshot from disk, choosing the decoder by file extension.
pub fn load_session(path: impl AsRef<Path>, config: &SessionConfig) -> Result<SessionSnapshot> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        AuthzError::Session(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let format = SnapshotFormat::from_path(path);
    let snapshot = SessionSnapshot::parse(&content, format)?;

    debug!(
        path = %path.display(),
        signed_in = snapshot.is_signed_in(),
        "Loaded session snapshot"
    );

    if config.warn_unknown_roles {
        report_unrecognised(&snapshot);
    }

    Ok(snapshot)
}

/// Log roles and permissions that grant nothing because this build does not
/// know them. Returns how many entries were reported.
pub fn report_unrecognised(snapshot: &SessionSnapshot) -> usize {
    let Some(user) = snapshot.user() else {
        return 0;
    };

    let roles = user.unknown_roles();
    for role in &roles {
        warn!(user_id = %user.display_id(), role = %role, "Ignoring unknown role");
    }

    let permissions = user.unknown_permissions();
    for permission in &permissions {
        warn!(user_id = %user.display_id(), permission = %permission, "Ignoring unknown permission");
    }

    roles.len() + permissions.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rbac::Role;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_path() {
        assert_eq!(SnapshotFormat::from_path(&PathBuf::from("s.yaml")), SnapshotFormat::Yaml);
        assert_eq!(SnapshotFormat::from_path(&PathBuf::from("s.YML")), SnapshotFormat::Yaml);
        assert_eq!(SnapshotFormat::from_path(&PathBuf::from("s.toml")), SnapshotFormat::Toml);
        assert_eq!(SnapshotFormat::from_path(&PathBuf::from("s.json")), SnapshotFormat::Json);
        assert_eq!(SnapshotFormat::from_path(&PathBuf::from("session")), SnapshotFormat::Json);
    }

    #[test]
    fn test_signed_out_snapshots() {
        assert_eq!(parse_session_json(r#"{ "user": null }"#).unwrap(), SessionSnapshot::signed_out());
        assert_eq!(parse_session_json("{}").unwrap(), SessionSnapshot::signed_out());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = "user:\n  id: u-9\n  roles: [PROCUREMENT_OFFICER]\n";
        let snapshot = SessionSnapshot::parse(yaml, SnapshotFormat::Yaml).unwrap();
        let user = snapshot.user().unwrap();
        assert_eq!(user.known_roles().collect::<Vec<_>>(), vec![Role::ProcurementOfficer]);
    }

    #[test]
    fn test_parse_toml() {
        let toml = "[user]\nid = \"u-10\"\npermissions = [\"tender:read\"]\n";
        let snapshot = SessionSnapshot::parse(toml, SnapshotFormat::Toml).unwrap();
        assert_eq!(snapshot.user().unwrap().permissions, vec!["tender:read".to_string()]);
    }

    #[test]
    fn test_malformed_json_is_session_error() {
        let err = parse_session_json("{ user: ").unwrap_err();
        assert!(matches!(err, AuthzError::Session(_)));
    }

    #[test]
    fn test_report_unrecognised() {
        let user = User::new("u")
            .with_role(Role::User)
            .with_raw_role("NOT_A_ROLE")
            .with_raw_permission("tender:archive");
        assert_eq!(report_unrecognised(&SessionSnapshot::signed_in(user)), 2);
        assert_eq!(report_unrecognised(&SessionSnapshot::signed_out()), 0);
    }
}
