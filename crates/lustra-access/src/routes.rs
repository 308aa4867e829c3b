//! Route gating.
//!
//! An ordered list of path rules decides whether a role may navigate to
//! a route. Rules are checked in declaration order and the first match
//! wins, so order is part of the contract: a specific rule placed above
//! a broad one restricts the paths the broad rule would otherwise
//! cover, and reordering them changes outcomes.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::hierarchy::RoleRegistry;
use crate::roles::Role;

// ============================================================================
// PathPattern
// ============================================================================

/// Pattern for matching route paths.
///
/// The kind is fixed at declaration time by the raw pattern's shape:
/// a trailing `/*` declares a wildcard, a trailing `/` declares a
/// prefix, anything else is an exact path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathPattern {
    /// Matches exactly this path and nothing else.
    Exact(String),

    /// Matches any path starting with this prefix (ends in `/`).
    ///
    /// The path equal to the prefix *minus* its trailing slash does not
    /// match; declare a separate exact rule if that page exists.
    Prefix(String),

    /// Declared with a trailing `/*`; matches any path starting with
    /// the part before the `*`.
    Wildcard(String),
}

impl PathPattern {
    /// Classifies a raw pattern string.
    pub fn parse(raw: &str) -> PathPattern {
        if let Some(prefix) = raw.strip_suffix('*') {
            if prefix.ends_with('/') {
                return PathPattern::Wildcard(prefix.to_string());
            }
        }
        if raw.ends_with('/') {
            PathPattern::Prefix(raw.to_string())
        } else {
            PathPattern::Exact(raw.to_string())
        }
    }

    /// Returns whether this pattern matches a normalized path.
    ///
    /// Matching is case-sensitive, exact-string comparison.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Exact(exact) => path == exact,
            PathPattern::Prefix(prefix) | PathPattern::Wildcard(prefix) => {
                path.starts_with(prefix.as_str())
            }
        }
    }
}

// ============================================================================
// PathRule
// ============================================================================

/// A single route rule: pattern plus the roles allowed through it.
///
/// A role passes the rule when its hierarchy closure intersects the
/// allowed set, so granting `Staff` also admits every role whose
/// closure contains `Staff`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRule {
    /// Pattern this rule applies to.
    pub pattern: PathPattern,

    /// Roles allowed through this rule.
    pub allowed_roles: BTreeSet<Role>,
}

impl PathRule {
    /// Creates a rule from a raw pattern string and allowed roles.
    pub fn new(pattern: &str, allowed: impl IntoIterator<Item = Role>) -> Self {
        Self {
            pattern: PathPattern::parse(pattern),
            allowed_roles: allowed.into_iter().collect(),
        }
    }
}

// ============================================================================
// RouteTable
// ============================================================================

/// Ordered route rules, first match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    rules: Vec<PathRule>,
}

impl RouteTable {
    /// Creates a table from an ordered rule list.
    pub fn new(rules: Vec<PathRule>) -> Self {
        Self { rules }
    }

    /// Appends a rule; declaration order is evaluation order.
    pub fn rule(mut self, pattern: &str, allowed: impl IntoIterator<Item = Role>) -> Self {
        self.rules.push(PathRule::new(pattern, allowed));
        self
    }

    /// The standard portal route table.
    ///
    /// Granting `Guest` admits every role, since all closures contain
    /// `Guest`. Specific rules sit above the broad ones they carve out
    /// of (first match wins).
    pub fn standard() -> Self {
        Self::new(Vec::new())
            .rule("/index.html", [Role::Guest])
            .rule("/login.html", [Role::Guest])
            .rule("/portal/", [Role::Customer])
            // Archived store records are restricted before the broad
            // store wildcard below can admit field staff.
            .rule("/stores/archive/", [Role::Manager])
            .rule("/stores/*", [Role::Staff])
            .rule("/jobs/*", [Role::Staff])
            .rule("/schedule/", [Role::Concierge])
            .rule("/clients/", [Role::Concierge, Role::Manager])
            .rule("/billing/", [Role::Customer, Role::Manager])
            .rule("/manage/", [Role::Manager])
            .rule("/admin/", [Role::Admin, Role::Developer])
    }

    /// The ordered rules.
    pub fn rules(&self) -> &[PathRule] {
        &self.rules
    }

    /// Decides whether `role` may navigate to `path`.
    ///
    /// The path is normalized (query string and fragment stripped)
    /// before matching. Admin and Developer pass unconditionally
    /// without consulting the rules. Otherwise the first matching rule
    /// decides: allowed iff the role's declared closure intersects the
    /// rule's allowed set. No matching rule means deny.
    pub fn resolve(&self, path: &str, role: Role, registry: &RoleRegistry) -> bool {
        let path = normalize_path(path);

        if role.bypasses_route_rules() {
            return true;
        }

        for rule in &self.rules {
            if rule.pattern.matches(path) {
                return registry.intersects(role, &rule.allowed_roles);
            }
        }

        false
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Strips the query string and fragment from a route path.
fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

// ============================================================================
// Tests
// ============================================================================
