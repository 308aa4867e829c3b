//! Immutable access configuration.
//!
//! [`AccessConfig`] bundles the role registry, route table, and
//! permission matrix into one value constructed at process start and
//! passed explicitly to whatever consumes it. There is no ambient
//! global: callers that want different policy (staging, tests) build a
//! different value.
//!
//! The tables derive serde so deployed policy can be snapshotted and
//! diffed, but nothing here reads or writes files; the standard tables
//! are static declarations.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::context::PrincipalContext;
use crate::evaluator::{self, Decision};
use crate::hierarchy::RoleRegistry;
use crate::permissions::{PermissionKey, PermissionMatrix};
use crate::roles::Role;
use crate::routes::RouteTable;

/// Complete access policy for one deployment.
///
/// Read-only after construction; safe to share across threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessConfig {
    registry: RoleRegistry,
    routes: RouteTable,
    matrix: PermissionMatrix,
}

impl AccessConfig {
    /// Bundles a registry, route table, and matrix.
    pub fn new(registry: RoleRegistry, routes: RouteTable, matrix: PermissionMatrix) -> Self {
        Self {
            registry,
            routes,
            matrix,
        }
    }

    /// The standard portal policy.
    pub fn standard() -> Self {
        Self::new(
            RoleRegistry::standard(),
            RouteTable::standard(),
            PermissionMatrix::standard(),
        )
    }

    /// The role registry.
    pub fn registry(&self) -> &RoleRegistry {
        &self.registry
    }

    /// The route table.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// The permission matrix.
    pub fn matrix(&self) -> &PermissionMatrix {
        &self.matrix
    }

    /// Decides whether the session role may navigate to `path`.
    ///
    /// Unknown role identifiers degrade to guest.
    pub fn resolve(&self, path: &str, role_ident: &str) -> bool {
        self.resolve_role(path, Role::from_ident_or_guest(role_ident))
    }

    /// Typed variant of [`AccessConfig::resolve`].
    pub fn resolve_role(&self, path: &str, role: Role) -> bool {
        self.routes.resolve(path, role, &self.registry)
    }

    /// Evaluates a permission key string for the given context.
    ///
    /// Unknown keys answer from the guest row, which declares nothing,
    /// so they deny.
    pub fn evaluate(&self, key: &str, context: &PrincipalContext) -> bool {
        PermissionKey::from_key(key)
            .is_some_and(|key| evaluator::evaluate(&self.matrix, key, context))
    }

    /// Typed variant of [`AccessConfig::evaluate`].
    pub fn evaluate_key(&self, key: PermissionKey, context: &PrincipalContext) -> bool {
        evaluator::evaluate(&self.matrix, key, context)
    }

    /// Evaluates a permission and explains the outcome for audit logs.
    pub fn decision(&self, key: PermissionKey, context: &PrincipalContext) -> Decision {
        evaluator::evaluate_with_reason(&self.matrix, key, context)
    }

    /// Returns the declared closure of a role identifier as identifier
    /// strings. Unknown identifiers resolve to the guest closure.
    pub fn inherited_idents(&self, role_ident: &str) -> BTreeSet<&'static str> {
        self.registry
            .inherited_roles_for_ident(role_ident)
            .iter()
            .map(Role::ident)
            .collect()
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_boundary_resolve() {
        let config = AccessConfig::standard();

        assert!(config.resolve("/stores/s-1.html", "staff"));
        assert!(!config.resolve("/stores/s-1.html", "customer"));
        // Unknown role identifier degrades to guest.
        assert!(!config.resolve("/stores/s-1.html", "root"));
        // Admin bypass holds through the string boundary.
        assert!(config.resolve("/totally-unlisted-page.html", "admin"));
        assert!(config.resolve("/totally-unlisted-page.html", "developer"));
    }

    #[test]
    fn test_string_boundary_evaluate() {
        let config = AccessConfig::standard();

        let concierge = PrincipalContext::new(Role::Concierge);
        assert!(!config.evaluate("client_contract", &concierge));
        assert!(config.evaluate("client_basic", &concierge));

        // Unknown keys deny.
        assert!(!config.evaluate("no_such_key", &PrincipalContext::new(Role::Admin)));
    }

    #[test]
    fn test_inherited_idents() {
        let config = AccessConfig::standard();

        assert_eq!(
            config.inherited_idents("concierge"),
            BTreeSet::from(["concierge", "staff", "guest"])
        );
        // Unknown identifiers resolve to the guest closure.
        assert_eq!(config.inherited_idents("root"), BTreeSet::from(["guest"]));
    }

    #[test]
    fn test_policy_snapshot_round_trips() {
        let config = AccessConfig::standard();
        let json = serde_json::to_string(&config).unwrap();
        let back: AccessConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
