//! Integration tests for loading session snapshots from disk.

use std::io::Write;

use tenderdesk_core::config::SessionConfig;
use tenderdesk_core::prelude::*;

fn write_snapshot(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_json_snapshot() {
    let file = write_snapshot(
        ".json",
        r#"{ "user": { "id": "u-1", "email": "buyer@example.test", "roles": ["PROCUREMENT_OFFICER"] } }"#,
    );

    let snapshot = load_session(file.path(), &SessionConfig::default()).unwrap();
    let user = snapshot.user();
    assert!(has_permission(user, Permission::TenderPublish));
    assert!(!has_permission(user, Permission::PaymentProcess));
    assert!(!is_admin(user));
}

#[test]
fn test_load_yaml_snapshot() {
    let file = write_snapshot(
        ".yaml",
        "user:\n  id: u-2\n  roles:\n    - USER\n  permissions:\n    - admin:dashboard\n",
    );

    let snapshot = load_session(file.path(), &SessionConfig::default()).unwrap();
    assert!(can_access_admin(snapshot.user()));
    assert!(!is_admin(snapshot.user()));
}

#[test]
fn test_load_toml_snapshot() {
    let file = write_snapshot(
        ".toml",
        "[user]\nid = \"u-3\"\nroles = [\"SUPER_ADMIN\"]\n",
    );

    let snapshot = load_session(file.path(), &SessionConfig::default()).unwrap();
    assert!(is_super_admin(snapshot.user()));
    assert_eq!(get_user_permissions(snapshot.user()).len(), Permission::ALL.len());
}

#[test]
fn test_signed_out_snapshot_denies() {
    let file = write_snapshot(".json", r#"{ "user": null }"#);

    let snapshot = load_session(file.path(), &SessionConfig::default()).unwrap();
    assert!(!snapshot.is_signed_in());
    assert!(!has_permission(snapshot.user(), Permission::TenderRead));
    assert!(has_all_permissions(snapshot.user(), &[]));
}

#[test]
fn test_unknown_roles_load_without_error() {
    let file = write_snapshot(
        ".json",
        r#"{ "user": { "id": "u-4", "roles": ["NOT_A_ROLE", "VENDOR"], "permissions": ["bid:teleport"] } }"#,
    );

    let quiet = SessionConfig {
        warn_unknown_roles: false,
        ..SessionConfig::default()
    };
    let snapshot = load_session(file.path(), &quiet).unwrap();
    let user = snapshot.user();
    assert_eq!(get_user_permissions(user), Role::Vendor.permission_set());
}

#[test]
fn test_missing_file_is_session_error() {
    let err = load_session("/nonexistent/session.json", &SessionConfig::default()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidSession);
}

#[test]
fn test_user_without_id_is_accepted() {
    let snapshot = parse_session_json(r#"{ "user": { "roles": ["VENDOR"] } }"#).unwrap();
    let user = snapshot.user();
    assert!(snapshot.is_signed_in());
    assert_eq!(user.map(User::display_id), Some(UNKNOWN_USER_ID));
    assert!(has_permission(user, Permission::BidSubmit));
    assert!(!has_permission(user, Permission::PaymentProcess));
}

#[test]
fn test_malformed_entries_grant_nothing() {
    let file = write_snapshot(
        ".json",
        r#"{ "user": { "id": "u-5", "roles": ["VENDOR", null, 42], "permissions": [false, "payment:process"] } }"#,
    );

    let snapshot = load_session(file.path(), &SessionConfig::default()).unwrap();
    let user = snapshot.user();
    assert!(has_permission(user, Permission::BidSubmit));
    assert!(has_permission(user, Permission::PaymentProcess));
    assert!(!is_admin(user));
}

#[test]
fn test_malformed_yaml_list_degrades_to_deny() {
    let file = write_snapshot(".yaml", "user:\n  roles: ADMIN\n  permissions: ~\n");

    let snapshot = load_session(file.path(), &SessionConfig::default()).unwrap();
    assert!(snapshot.is_signed_in());
    assert!(get_user_permissions(snapshot.user()).is_empty());
    assert!(!is_admin(snapshot.user()));
}
