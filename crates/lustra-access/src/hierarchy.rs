//! Role hierarchy closures.
//!
//! The registry serves the *declared* closure for each role: the full
//! set of roles whose grants that role also receives, itself included.
//! Lookups return the declared sets exactly; nothing is recomputed at
//! lookup time, so the declarations are the single runtime source of
//! truth for inheritance.
//!
//! [`RoleGraph`] carries the same hierarchy as an explicit edge list
//! with a transitive-closure computation. It exists for the tests: the
//! computed closure of every role is compared against the declared set,
//! so any drift between the two shows up as a failing test instead of a
//! silently inconsistent policy.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::roles::Role;

// ============================================================================
// RoleRegistry
// ============================================================================

/// Registry of declared role hierarchy closures.
///
/// Immutable after construction; build once at startup and share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRegistry {
    closures: BTreeMap<Role, BTreeSet<Role>>,
}

impl RoleRegistry {
    /// Creates a registry from declared closures.
    ///
    /// Declared rows are kept verbatim. Roles without a declared row get
    /// a reflexive singleton so every lookup is total.
    pub fn new(declared: BTreeMap<Role, BTreeSet<Role>>) -> Self {
        let mut closures = declared;
        for role in Role::ALL {
            closures.entry(role).or_insert_with(|| BTreeSet::from([role]));
        }
        debug_assert!(
            closures.iter().all(|(role, set)| set.contains(role)),
            "declared closures must be reflexive"
        );
        Self { closures }
    }

    /// The standard portal hierarchy.
    ///
    /// Concierge supervises staff; manager covers the whole operations
    /// side plus the customer surface; developer and admin sit on top.
    pub fn standard() -> Self {
        let mut declared = BTreeMap::new();
        declared.insert(Role::Guest, BTreeSet::from([Role::Guest]));
        declared.insert(Role::Customer, BTreeSet::from([Role::Customer, Role::Guest]));
        declared.insert(Role::Staff, BTreeSet::from([Role::Staff, Role::Guest]));
        declared.insert(
            Role::Concierge,
            BTreeSet::from([Role::Concierge, Role::Staff, Role::Guest]),
        );
        declared.insert(
            Role::Manager,
            BTreeSet::from([
                Role::Manager,
                Role::Concierge,
                Role::Staff,
                Role::Customer,
                Role::Guest,
            ]),
        );
        declared.insert(
            Role::Developer,
            BTreeSet::from([
                Role::Developer,
                Role::Manager,
                Role::Concierge,
                Role::Staff,
                Role::Customer,
                Role::Guest,
            ]),
        );
        declared.insert(
            Role::Admin,
            BTreeSet::from([
                Role::Admin,
                Role::Developer,
                Role::Manager,
                Role::Concierge,
                Role::Staff,
                Role::Customer,
                Role::Guest,
            ]),
        );
        Self::new(declared)
    }

    /// Returns the declared closure for `role`.
    pub fn inherited_roles(&self, role: Role) -> &BTreeSet<Role> {
        self.closures
            .get(&role)
            .unwrap_or_else(|| &self.closures[&Role::Guest])
    }

    /// String-boundary lookup: unknown identifiers resolve to the Guest
    /// closure.
    pub fn inherited_roles_for_ident(&self, ident: &str) -> &BTreeSet<Role> {
        self.inherited_roles(Role::from_ident_or_guest(ident))
    }

    /// Returns whether `role`'s closure intersects `allowed`.
    pub fn intersects(&self, role: Role, allowed: &BTreeSet<Role>) -> bool {
        self.inherited_roles(role)
            .iter()
            .any(|inherited| allowed.contains(inherited))
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// RoleGraph
// ============================================================================

/// The role hierarchy as a directed graph.
///
/// An edge `a -> b` means `a` directly inherits `b`'s grants. The graph
/// is not consulted at runtime; its computed closure exists so tests
/// can detect drift between the edges and the declared closure sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGraph {
    inherits: BTreeMap<Role, BTreeSet<Role>>,
}

impl RoleGraph {
    /// Creates a graph from direct-inheritance edges.
    pub fn new(inherits: BTreeMap<Role, BTreeSet<Role>>) -> Self {
        Self { inherits }
    }

    /// The standard portal hierarchy as edges.
    pub fn standard() -> Self {
        let mut inherits = BTreeMap::new();
        inherits.insert(Role::Admin, BTreeSet::from([Role::Developer]));
        inherits.insert(Role::Developer, BTreeSet::from([Role::Manager]));
        inherits.insert(
            Role::Manager,
            BTreeSet::from([Role::Concierge, Role::Customer]),
        );
        inherits.insert(Role::Concierge, BTreeSet::from([Role::Staff]));
        inherits.insert(Role::Staff, BTreeSet::from([Role::Guest]));
        inherits.insert(Role::Customer, BTreeSet::from([Role::Guest]));
        Self::new(inherits)
    }

    /// Direct-inheritance targets of `role`, if any are declared.
    pub fn direct(&self, role: Role) -> Option<&BTreeSet<Role>> {
        self.inherits.get(&role)
    }

    /// Computes the reflexive transitive closure of `role`.
    ///
    /// Breadth-first walk over the edge list; cycles terminate because
    /// visited roles are never re-enqueued.
    pub fn computed_closure(&self, role: Role) -> BTreeSet<Role> {
        let mut closure = BTreeSet::from([role]);
        let mut frontier = vec![role];
        while let Some(current) = frontier.pop() {
            if let Some(targets) = self.inherits.get(&current) {
                for target in targets {
                    if closure.insert(*target) {
                        frontier.push(*target);
                    }
                }
            }
        }
        closure
    }
}

impl Default for RoleGraph {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closures_are_reflexive() {
        let registry = RoleRegistry::standard();
        for role in Role::ALL {
            assert!(
                registry.inherited_roles(role).contains(&role),
                "closure of {role:?} must contain itself"
            );
        }
    }

    #[test]
    fn test_guest_closure_is_singleton() {
        let registry = RoleRegistry::standard();
        assert_eq!(
            registry.inherited_roles(Role::Guest),
            &BTreeSet::from([Role::Guest])
        );
    }

    #[test]
    fn test_manager_inherits_operations_side() {
        let registry = RoleRegistry::standard();
        let closure = registry.inherited_roles(Role::Manager);
        assert!(closure.contains(&Role::Concierge));
        assert!(closure.contains(&Role::Staff));
        assert!(closure.contains(&Role::Customer));
        assert!(!closure.contains(&Role::Admin));
        assert!(!closure.contains(&Role::Developer));
    }

    #[test]
    fn test_unknown_ident_gets_guest_closure() {
        let registry = RoleRegistry::standard();
        assert_eq!(
            registry.inherited_roles_for_ident("superuser"),
            registry.inherited_roles(Role::Guest)
        );
        assert_eq!(
            registry.inherited_roles_for_ident("manager"),
            registry.inherited_roles(Role::Manager)
        );
    }

    #[test]
    fn test_missing_row_becomes_reflexive_singleton() {
        // Partial declarations still yield a total registry.
        let registry = RoleRegistry::new(BTreeMap::new());
        for role in Role::ALL {
            assert_eq!(registry.inherited_roles(role), &BTreeSet::from([role]));
        }
    }

    #[test]
    fn test_declared_closures_match_graph_closure() {
        // Drift guard: the hand-declared sets must equal the closure
        // computed from the edge list. Editing one without the other
        // fails here.
        let registry = RoleRegistry::standard();
        let graph = RoleGraph::standard();
        for role in Role::ALL {
            assert_eq!(
                registry.inherited_roles(role),
                &graph.computed_closure(role),
                "declared closure of {role:?} drifted from the role graph"
            );
        }
    }

    #[test]
    fn test_computed_closure_terminates_on_cycle() {
        let mut inherits = BTreeMap::new();
        inherits.insert(Role::Staff, BTreeSet::from([Role::Concierge]));
        inherits.insert(Role::Concierge, BTreeSet::from([Role::Staff]));
        let graph = RoleGraph::new(inherits);

        let closure = graph.computed_closure(Role::Staff);
        assert_eq!(closure, BTreeSet::from([Role::Staff, Role::Concierge]));
    }

    #[test]
    fn test_intersects() {
        let registry = RoleRegistry::standard();
        let allowed = BTreeSet::from([Role::Staff]);
        assert!(registry.intersects(Role::Concierge, &allowed));
        assert!(registry.intersects(Role::Staff, &allowed));
        assert!(!registry.intersects(Role::Customer, &allowed));
    }
}
