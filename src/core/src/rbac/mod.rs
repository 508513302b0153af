//! Role-based access control for the procurement console.
//!
//! This module provides:
//! - **Catalog**: the closed set of `resource:action` permissions
//! - **Roles**: the built-in roles and the permissions each one grants
//! - **Models**: the signed-in user as the authorization layer sees it
//! - **Policy**: pure, fail-closed checks used to gate UI affordances
//!
//! # Usage
//!
//! ```rust
//! use tenderdesk_core::rbac::{has_permission, Permission, Role, User};
//!
//! let user = User::new("u-42").with_role(Role::Vendor);
//!
//! assert!(has_permission(Some(&user), Permission::BidSubmit));
//! assert!(!has_permission(Some(&user), Permission::PaymentProcess));
//! assert!(!has_permission(None, Permission::TenderRead));
//! ```

pub mod catalog;
pub mod models;
pub mod policy;
pub mod roles;

pub use catalog::{Permission, Resource};
pub use models::{User, UserId, UNKNOWN_USER_ID};
pub use policy::{
    can_access_admin, enforce, explain, get_user_permissions, has_all_permissions,
    has_any_permission, has_any_role, has_permission, has_role, is_admin, is_super_admin,
    GrantSource, PolicyDecision,
};
pub use roles::{role_permissions, Role};
