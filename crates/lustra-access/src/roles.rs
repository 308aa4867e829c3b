#![allow(clippy::match_same_arms)]
//! Role definitions for the portal.
//!
//! Defines 7 roles with escalating privileges:
//! - Guest: Unauthenticated visitor (most restrictive)
//! - Customer: Client-side login, sees own client's data
//! - Staff: Field cleaner, sees assigned stores
//! - Concierge: On-site coordinator for a set of stores
//! - Manager: Operations manager across clients and stores
//! - Developer: Engineering access, bypasses route rules
//! - Admin: Full access (least restrictive)

use serde::{Deserialize, Serialize};

/// Role in the access control system.
///
/// Roles are ordered from least to most privileged:
/// Guest < Customer < Staff < Concierge < Manager < Developer < Admin
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Unauthenticated visitor.
    ///
    /// Any session without a recognized role resolves to Guest, so the
    /// Guest grants are the floor of the whole policy.
    Guest,

    /// Customer login belonging to a client organization.
    ///
    /// **Sees:**
    /// - Own client's contract, billing, and store records
    /// - Nothing belonging to other clients
    Customer,

    /// Field staff performing cleaning jobs.
    ///
    /// **Sees:**
    /// - Stores on their assignment list, including key/access info
    /// - Job reports for those stores
    Staff,

    /// On-site coordinator managing staff at a set of stores.
    ///
    /// **Sees:**
    /// - Client directory entries for their stores
    /// - Store schedules and job reports within their assignments
    Concierge,

    /// Operations manager.
    ///
    /// **Sees:**
    /// - All clients, stores, and job data
    /// - Can edit records; cannot hard-delete them
    Manager,

    /// Engineering access for the portal itself.
    ///
    /// Bypasses route rules entirely (same as Admin) so unreleased
    /// pages stay reachable in test environments.
    Developer,

    /// Administrator with full access.
    Admin,
}

impl Role {
    /// All declared roles, least privileged first.
    pub const ALL: [Role; 7] = [
        Role::Guest,
        Role::Customer,
        Role::Staff,
        Role::Concierge,
        Role::Manager,
        Role::Developer,
        Role::Admin,
    ];

    /// Stable string identifier used at the session boundary.
    pub fn ident(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::Customer => "customer",
            Role::Staff => "staff",
            Role::Concierge => "concierge",
            Role::Manager => "manager",
            Role::Developer => "developer",
            Role::Admin => "admin",
        }
    }

    /// Human-readable name for display surfaces.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Guest => "Guest",
            Role::Customer => "Customer",
            Role::Staff => "Cleaning Staff",
            Role::Concierge => "Concierge",
            Role::Manager => "Operations Manager",
            Role::Developer => "Developer",
            Role::Admin => "Administrator",
        }
    }

    /// Parses a role identifier. Returns `None` for unknown identifiers.
    ///
    /// Matching is exact and case-sensitive; identifiers come from the
    /// session store, not from user input.
    pub fn from_ident(ident: &str) -> Option<Role> {
        match ident {
            "guest" => Some(Role::Guest),
            "customer" => Some(Role::Customer),
            "staff" => Some(Role::Staff),
            "concierge" => Some(Role::Concierge),
            "manager" => Some(Role::Manager),
            "developer" => Some(Role::Developer),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Parses a role identifier, treating anything unknown as [`Role::Guest`].
    ///
    /// This is the boundary contract: a missing or corrupted session
    /// role degrades to the most restrictive grants instead of erroring.
    pub fn from_ident_or_guest(ident: &str) -> Role {
        Role::from_ident(ident).unwrap_or(Role::Guest)
    }

    /// Returns whether this role skips route rules entirely.
    ///
    /// Admin and Developer may navigate to any path, listed or not,
    /// without consulting the route table.
    pub fn bypasses_route_rules(&self) -> bool {
        matches!(self, Role::Admin | Role::Developer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering() {
        assert!(Role::Guest < Role::Customer);
        assert!(Role::Customer < Role::Staff);
        assert!(Role::Staff < Role::Concierge);
        assert!(Role::Concierge < Role::Manager);
        assert!(Role::Manager < Role::Developer);
        assert!(Role::Developer < Role::Admin);
    }

    #[test]
    fn test_ident_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::from_ident(role.ident()), Some(role));
        }
    }

    #[test]
    fn test_unknown_ident_degrades_to_guest() {
        assert_eq!(Role::from_ident("superuser"), None);
        assert_eq!(Role::from_ident_or_guest("superuser"), Role::Guest);
        assert_eq!(Role::from_ident_or_guest(""), Role::Guest);
        // Case-sensitive on purpose.
        assert_eq!(Role::from_ident_or_guest("Admin"), Role::Guest);
    }

    #[test]
    fn test_route_rule_bypass() {
        assert!(Role::Admin.bypasses_route_rules());
        assert!(Role::Developer.bypasses_route_rules());
        assert!(!Role::Manager.bypasses_route_rules());
        assert!(!Role::Concierge.bypasses_route_rules());
        assert!(!Role::Staff.bypasses_route_rules());
        assert!(!Role::Customer.bypasses_route_rules());
        assert!(!Role::Guest.bypasses_route_rules());
    }

    #[test]
    fn test_serde_uses_snake_case_idents() {
        let json = serde_json::to_string(&Role::Concierge).unwrap();
        assert_eq!(json, "\"concierge\"");

        let back: Role = serde_json::from_str("\"staff\"").unwrap();
        assert_eq!(back, Role::Staff);
    }
}
