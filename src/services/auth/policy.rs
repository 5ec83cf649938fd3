//! Role / ownership authorization decision (core logic).
//!
//! This module is "core-only": it knows nothing about axum, request extensions or path
//! extraction. `middleware::auth::authorize` reads the identity and the `{id}` path parameter
//! and hands them to [`AccessPolicy::decide`].
//!
//! Evaluation order matters:
//! 1. same-user bypass (when enabled) wins over everything, including a missing role
//! 2. no role → `ROLE_NOT_FOUND`
//! 3. role in the allowed set → allow
//! 4. otherwise → `INSUFFICIENT_ROLE`

use std::collections::BTreeSet;
use std::fmt;

use crate::api::v1::extractors::Identity;

/// Roles issued by the identity provider for this API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Instructor,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Instructor => "instructor",
            Role::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

/// Why a request was denied. Rendered to clients as `{ code, message }` (403).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthorizationError {
    #[error("Forbidden: No role found")]
    RoleNotFound,
    #[error("Forbidden: Insufficient role")]
    InsufficientRole,
}

impl AuthorizationError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::RoleNotFound => "ROLE_NOT_FOUND",
            Self::InsufficientRole => "INSUFFICIENT_ROLE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(AuthorizationError),
}

/// Rejected policy configuration (startup-time only).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("allowed role names must not be blank")]
    BlankRole,
}

/// Access policy bound to a route at registration time.
///
/// - `allowed_roles` may be empty: nobody passes by role, only the same-user bypass can allow.
/// - Immutable after construction; routes share it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessPolicy {
    allowed_roles: BTreeSet<String>,
    allow_same_user: bool,
}

impl AccessPolicy {
    /// Build a policy from role names (`Role` or plain strings), rejecting blank ones.
    ///
    /// Routes are assembled through this at startup, so a bad name fails `routes()`.
    pub fn new<I, R>(roles: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        let mut allowed_roles = BTreeSet::new();
        for role in roles {
            let role: String = role.into();
            if role.trim().is_empty() {
                return Err(PolicyError::BlankRole);
            }
            allowed_roles.insert(role);
        }

        Ok(Self {
            allowed_roles,
            allow_same_user: false,
        })
    }

    /// Let the subject named by the `{id}` path parameter through regardless of role.
    pub fn allow_same_user(mut self) -> Self {
        self.allow_same_user = true;
        self
    }

    pub fn allows_same_user(&self) -> bool {
        self.allow_same_user
    }

    pub fn decide(&self, identity: &Identity, resource_owner_id: Option<&str>) -> Decision {
        if self.allow_same_user && is_same_user(identity.user_id.as_deref(), resource_owner_id) {
            return Decision::Allow;
        }

        let Some(role) = identity.role.as_deref() else {
            return Decision::Deny(AuthorizationError::RoleNotFound);
        };

        if self.allowed_roles.contains(role) {
            Decision::Allow
        } else {
            Decision::Deny(AuthorizationError::InsufficientRole)
        }
    }
}

// Empty identifiers never match, even against each other.
fn is_same_user(user_id: Option<&str>, resource_owner_id: Option<&str>) -> bool {
    match (user_id, resource_owner_id) {
        (Some(uid), Some(owner)) => !uid.is_empty() && uid == owner,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn identity(user_id: Option<&str>, role: Option<&str>) -> Identity {
        Identity {
            user_id: user_id.map(str::to_string),
            role: role.map(str::to_string),
        }
    }

    #[test]
    fn same_user_bypasses_missing_role() {
        let policy = AccessPolicy::new([Role::Admin]).unwrap().allow_same_user();
        let decision = policy.decide(&identity(Some("u1"), None), Some("u1"));
        assert_eq!(decision, Decision::Allow);
    }

    #[test]
    fn same_user_bypasses_empty_role_set() {
        let policy = AccessPolicy::new(Vec::<String>::new())
            .unwrap()
            .allow_same_user();
        let decision = policy.decide(&identity(Some("u1"), None), Some("u1"));
        assert_eq!(decision, Decision::Allow);
    }

    #[test]
    fn same_user_is_ignored_unless_enabled() {
        let policy = AccessPolicy::new([Role::Admin]).unwrap();
        let decision = policy.decide(&identity(Some("u1"), Some("student")), Some("u1"));
        assert_eq!(decision, Decision::Deny(AuthorizationError::InsufficientRole));
    }

    #[test]
    fn missing_role_for_other_user_is_role_not_found() {
        let policy = AccessPolicy::new([Role::Student]).unwrap().allow_same_user();
        let decision = policy.decide(&identity(Some("u1"), None), Some("u2"));
        assert_eq!(decision, Decision::Deny(AuthorizationError::RoleNotFound));
    }

    #[test]
    fn missing_role_without_owner_is_role_not_found() {
        let policy = AccessPolicy::new([Role::Student]).unwrap().allow_same_user();
        let decision = policy.decide(&identity(Some("u1"), None), None);
        assert_eq!(decision, Decision::Deny(AuthorizationError::RoleNotFound));
    }

    #[test]
    fn allowed_role_passes() {
        let policy = AccessPolicy::new([Role::Admin, Role::Instructor]).unwrap();
        let decision = policy.decide(&identity(None, Some("instructor")), None);
        assert_eq!(decision, Decision::Allow);
    }

    #[test]
    fn other_role_is_insufficient() {
        let policy = AccessPolicy::new([Role::Admin]).unwrap();
        let decision = policy.decide(&identity(None, Some("student")), None);
        assert_eq!(decision, Decision::Deny(AuthorizationError::InsufficientRole));
    }

    #[test]
    fn role_match_is_case_sensitive() {
        let policy = AccessPolicy::new([Role::Admin]).unwrap();
        let decision = policy.decide(&identity(None, Some("Admin")), None);
        assert_eq!(decision, Decision::Deny(AuthorizationError::InsufficientRole));
    }

    #[test]
    fn empty_identifiers_are_not_same_user() {
        let policy = AccessPolicy::new([Role::Admin]).unwrap().allow_same_user();
        let decision = policy.decide(&identity(Some(""), None), Some(""));
        assert_eq!(decision, Decision::Deny(AuthorizationError::RoleNotFound));
    }

    #[test]
    fn empty_role_set_denies_every_role() {
        let policy = AccessPolicy::new(Vec::<String>::new()).unwrap();
        let decision = policy.decide(&identity(Some("u1"), Some("admin")), Some("u2"));
        assert_eq!(decision, Decision::Deny(AuthorizationError::InsufficientRole));
    }

    #[test]
    fn blank_role_names_are_rejected() {
        assert_eq!(AccessPolicy::new(["admin", "  "]), Err(PolicyError::BlankRole));
        assert_eq!(AccessPolicy::new([""]), Err(PolicyError::BlankRole));
    }

    #[test]
    fn string_and_enum_constructors_agree() {
        let from_strings = AccessPolicy::new(["admin", "student"]).unwrap();
        let from_roles = AccessPolicy::new([Role::Student, Role::Admin]).unwrap();
        assert_eq!(from_strings, from_roles);
    }

    #[test]
    fn denial_codes_and_messages() {
        assert_eq!(AuthorizationError::RoleNotFound.code(), "ROLE_NOT_FOUND");
        assert_eq!(AuthorizationError::InsufficientRole.code(), "INSUFFICIENT_ROLE");
        assert_eq!(
            AuthorizationError::RoleNotFound.to_string(),
            "Forbidden: No role found"
        );
        assert_eq!(
            AuthorizationError::InsufficientRole.to_string(),
            "Forbidden: Insufficient role"
        );
    }

    fn opt_id() -> impl Strategy<Value = Option<String>> {
        proptest::option::of("[a-z0-9]{1,8}")
    }

    fn role_names() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec("[a-z]{1,10}", 0..4)
    }

    proptest! {
        #[test]
        fn owner_access_ignores_roles(
            uid in "[a-z0-9]{1,12}",
            role in proptest::option::of("[a-z]{1,10}"),
            roles in role_names(),
        ) {
            let policy = AccessPolicy::new(roles).unwrap().allow_same_user();
            let id = Identity { user_id: Some(uid.clone()), role };
            prop_assert_eq!(policy.decide(&id, Some(&uid)), Decision::Allow);
        }

        #[test]
        fn absent_role_without_bypass_is_role_not_found(
            uid in opt_id(),
            owner in opt_id(),
            roles in role_names(),
            same_user in any::<bool>(),
        ) {
            prop_assume!(!same_user || uid.is_none() || uid != owner);
            let mut policy = AccessPolicy::new(roles).unwrap();
            if same_user {
                policy = policy.allow_same_user();
            }
            let id = Identity { user_id: uid, role: None };
            prop_assert_eq!(
                policy.decide(&id, owner.as_deref()),
                Decision::Deny(AuthorizationError::RoleNotFound)
            );
        }

        #[test]
        fn role_membership_decides_without_bypass(
            role in "[a-z]{1,10}",
            roles in role_names(),
            uid in opt_id(),
            owner in opt_id(),
        ) {
            let policy = AccessPolicy::new(roles.clone()).unwrap();
            let id = Identity { user_id: uid, role: Some(role.clone()) };
            let expected = if roles.contains(&role) {
                Decision::Allow
            } else {
                Decision::Deny(AuthorizationError::InsufficientRole)
            };
            prop_assert_eq!(policy.decide(&id, owner.as_deref()), expected);
        }

        #[test]
        fn decisions_are_repeatable(
            uid in opt_id(),
            role in proptest::option::of("[a-z]{1,10}"),
            owner in opt_id(),
            roles in role_names(),
        ) {
            let policy = AccessPolicy::new(roles).unwrap().allow_same_user();
            let id = Identity { user_id: uid, role };
            prop_assert_eq!(
                policy.decide(&id, owner.as_deref()),
                policy.decide(&id, owner.as_deref())
            );
        }
    }
}
