//! # Tenderdesk Core
//!
//! The authorization model behind the Tenderdesk procurement console.
//!
//! ## Architecture
//!
//! - **RBAC**: permission catalog, built-in role map and the fail-closed evaluator
//!   that decides which actions the console offers to the signed-in user
//! - **Session**: loading the client-side snapshot of the signed-in user
//! - **Config**: file and environment configuration
//! - **Telemetry**: structured logging
//!
//! The evaluator is advisory. The REST backend authorizes every request on its
//! own; these checks only decide what is rendered and enabled.

pub mod config;
pub mod error;
pub mod rbac;
pub mod session;
pub mod telemetry;

pub use error::{AuthzError, ErrorCode, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{AuthzError, ErrorCode, Result};
    pub use crate::rbac::{
        can_access_admin, enforce, explain, get_user_permissions, has_all_permissions,
        has_any_permission, has_any_role, has_permission, has_role, is_admin, is_super_admin,
        role_permissions, GrantSource, Permission, PolicyDecision, Resource, Role, User, UserId,
        UNKNOWN_USER_ID,
    };
    pub use crate::session::{load_session, parse_session_json, SessionSnapshot, SnapshotFormat};
}
