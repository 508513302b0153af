//! Authorization evaluator.
//!
//! Answers "may this user do X?" against the static role map. Every function
//! is total: a missing user (`None`), an unknown role or an unrecognised
//! permission string never raises, it just contributes nothing. The result is
//! advisory and only drives what the console shows; the backend re-checks
//! every request.
//!
//! Note the vacuous cases: [`has_any_permission`] over an empty slice is
//! `false`, [`has_all_permissions`] over an empty slice is `true`.

use std::collections::HashSet;
use tracing::debug;

use super::catalog::Permission;
use super::models::User;
use super::roles::{role_permissions, Role};
use crate::error::AuthzError;

// ═══════════════════════════════════════════════════════════════════════════════
// Decision
// ═══════════════════════════════════════════════════════════════════════════════

/// Where an allowed permission came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantSource {
    /// Listed in the user's own `permissions`.
    Direct,
    /// Granted by one of the user's roles.
    Role(Role),
}

/// Result of a policy evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyDecision {
    /// The action is allowed.
    Allow(GrantSource),
    /// The action is denied, with a reason.
    Deny(String),
}

impl PolicyDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Deny(_))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Permission checks
// ═══════════════════════════════════════════════════════════════════════════════

fn grant_source(user: &User, permission: Permission) -> Option<GrantSource> {
    let wanted = permission.as_str();
    if user.permissions.iter().any(|p| p == wanted) {
        return Some(GrantSource::Direct);
    }
    user.roles
        .iter()
        .filter_map(|r| Role::parse(r))
        .find(|role| role.grants(permission))
        .map(GrantSource::Role)
}

/// Whether the user holds `permission`, directly or through any role.
pub fn has_permission(user: Option<&User>, permission: Permission) -> bool {
    user.is_some_and(|u| grant_source(u, permission).is_some())
}

/// Whether the user holds at least one of `permissions`. Empty input is `false`.
pub fn has_any_permission(user: Option<&User>, permissions: &[Permission]) -> bool {
    permissions.iter().any(|p| has_permission(user, *p))
}

/// Whether the user holds every one of `permissions`. Empty input is `true`,
/// even without a user.
pub fn has_all_permissions(user: Option<&User>, permissions: &[Permission]) -> bool {
    permissions.iter().all(|p| has_permission(user, *p))
}

/// The user's effective permissions: direct grants plus everything their roles
/// grant. Direct grants outside the catalog are dropped.
pub fn get_user_permissions(user: Option<&User>) -> HashSet<Permission> {
    let Some(user) = user else {
        return HashSet::new();
    };

    let direct = user.permissions.iter().filter_map(|p| Permission::parse(p));
    let from_roles = user
        .roles
        .iter()
        .flat_map(|r| role_permissions(r).iter().copied());

    direct.chain(from_roles).collect()
}

/// Same decision as [`has_permission`], with the grant source or deny reason.
pub fn explain(user: Option<&User>, permission: Permission) -> PolicyDecision {
    let Some(user) = user else {
        return PolicyDecision::Deny(format!(
            "No signed-in user; {} requires a session",
            permission
        ));
    };

    let decision = match grant_source(user, permission) {
        Some(source) => PolicyDecision::Allow(source),
        None => PolicyDecision::Deny(format!(
            "User {} does not have permission {}",
            user.display_id(), permission
        )),
    };

    debug!(
        user_id = %user.display_id(),
        permission = %permission,
        allowed = decision.is_allowed(),
        "Evaluated permission"
    );

    decision
}

/// Convenience: `Ok(())` if allowed, `Err(AuthzError::PermissionDenied)` otherwise.
pub fn enforce(user: Option<&User>, permission: Permission) -> Result<(), AuthzError> {
    match explain(user, permission) {
        PolicyDecision::Allow(_) => Ok(()),
        PolicyDecision::Deny(reason) => Err(AuthzError::PermissionDenied(reason)),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Role checks
// ═══════════════════════════════════════════════════════════════════════════════

/// Whether `role` is among the user's roles.
pub fn has_role(user: Option<&User>, role: Role) -> bool {
    let wanted = role.as_str();
    user.is_some_and(|u| u.roles.iter().any(|r| r == wanted))
}

/// Whether the user holds at least one of `roles`.
pub fn has_any_role(user: Option<&User>, roles: &[Role]) -> bool {
    roles.iter().any(|r| has_role(user, *r))
}

/// Role-based: the user is an ADMIN or SUPER_ADMIN, whatever they were granted directly.
pub fn is_admin(user: Option<&User>) -> bool {
    has_any_role(user, &[Role::Admin, Role::SuperAdmin])
}

pub fn is_super_admin(user: Option<&User>) -> bool {
    has_role(user, Role::SuperAdmin)
}

/// Capability-based: the user may open the admin console. Independent of
/// [`is_admin`]; a direct `admin:dashboard` grant is enough.
pub fn can_access_admin(user: Option<&User>) -> bool {
    has_permission(user, Permission::AdminDashboard)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn vendor() -> User {
        User::new("vendor-1").with_role(Role::Vendor)
    }

    #[test]
    fn test_none_user_denied() {
        for p in Permission::ALL {
            assert!(!has_permission(None, *p));
        }
        assert!(get_user_permissions(None).is_empty());
        assert!(!has_role(None, Role::User));
        assert!(explain(None, Permission::TenderRead).is_denied());
    }

    #[test]
    fn test_role_grant() {
        let user = vendor();
        assert!(has_permission(Some(&user), Permission::BidSubmit));
        assert!(!has_permission(Some(&user), Permission::PaymentProcess));
    }

    #[test]
    fn test_direct_grant() {
        let user = User::new("u").with_permission(Permission::PaymentProcess);
        assert!(has_permission(Some(&user), Permission::PaymentProcess));
        assert!(!has_permission(Some(&user), Permission::PaymentRead));
    }

    #[test]
    fn test_vacuous_cases() {
        let user = vendor();
        assert!(!has_any_permission(Some(&user), &[]));
        assert!(has_all_permissions(Some(&user), &[]));
        assert!(has_all_permissions(None, &[]));
        assert!(!has_any_permission(None, &[]));

        let root = User::new("root").with_role(Role::SuperAdmin);
        assert!(!has_any_permission(Some(&root), &[]));
    }

    #[test]
    fn test_any_and_all() {
        let user = vendor();
        let mixed = [Permission::BidSubmit, Permission::PaymentProcess];
        assert!(has_any_permission(Some(&user), &mixed));
        assert!(!has_all_permissions(Some(&user), &mixed));

        let bidding = [Permission::BidCreate, Permission::BidSubmit, Permission::BidWithdraw];
        assert!(has_all_permissions(Some(&user), &bidding));
    }

    #[test]
    fn test_explain_sources() {
        let user = vendor().with_permission(Permission::PaymentProcess);
        assert_eq!(
            explain(Some(&user), Permission::PaymentProcess),
            PolicyDecision::Allow(GrantSource::Direct)
        );
        assert_eq!(
            explain(Some(&user), Permission::BidSubmit),
            PolicyDecision::Allow(GrantSource::Role(Role::Vendor))
        );
        assert!(explain(Some(&user), Permission::AdminSettings).is_denied());
    }

    #[test]
    fn test_explain_agrees_with_has_permission() {
        let users = [
            User::new("a").with_role(Role::Auditor),
            User::new("b").with_raw_role("NOT_A_ROLE"),
            User::new("c").with_roles([Role::Vendor, Role::FinanceOfficer]),
            User::new("d").with_permission(Permission::AdminDashboard),
        ];
        for user in &users {
            for p in Permission::ALL {
                assert_eq!(
                    explain(Some(user), *p).is_allowed(),
                    has_permission(Some(user), *p)
                );
            }
        }
    }

    #[test]
    fn test_enforce() {
        let user = vendor();
        assert!(enforce(Some(&user), Permission::BidSubmit).is_ok());

        let err = enforce(Some(&user), Permission::TenderPublish).unwrap_err();
        assert!(matches!(err, AuthzError::PermissionDenied(_)));
        assert!(enforce(None, Permission::TenderRead).is_err());
    }

    #[test]
    fn test_role_checks() {
        let user = User::new("u").with_roles([Role::Auditor, Role::User]);
        assert!(has_role(Some(&user), Role::Auditor));
        assert!(!has_role(Some(&user), Role::Admin));
        assert!(has_any_role(Some(&user), &[Role::Admin, Role::User]));
        assert!(!has_any_role(Some(&user), &[]));
        assert!(!has_any_role(None, Role::ALL));
    }

    #[test]
    fn test_admin_predicates_are_independent() {
        let admin = User::new("a").with_role(Role::Admin);
        assert!(is_admin(Some(&admin)));
        assert!(!is_super_admin(Some(&admin)));
        assert!(can_access_admin(Some(&admin)));

        let granted = User::new("g")
            .with_role(Role::User)
            .with_permission(Permission::AdminDashboard);
        assert!(!is_admin(Some(&granted)));
        assert!(can_access_admin(Some(&granted)));

        let root = User::new("r").with_role(Role::SuperAdmin);
        assert!(is_admin(Some(&root)));
        assert!(is_super_admin(Some(&root)));
    }
}
