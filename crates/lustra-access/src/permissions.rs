#![allow(clippy::match_same_arms)]
//! Permission keys and the per-role decision table.
//!
//! Every guarded UI attribute or action has a [`PermissionKey`]. The
//! [`PermissionMatrix`] maps each (role, key) pair to an [`Access`]
//! value; scoped values defer the final decision to the evaluation
//! context (ownership or assignment match).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::roles::Role;

// ============================================================================
// PermissionKey
// ============================================================================

/// Identifier for a guarded resource attribute or action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionKey {
    /// Client directory entry: name, contact, service address.
    ClientBasic,

    /// Client contract terms and pricing.
    ClientContract,

    /// Client invoices and payment state.
    ClientBilling,

    /// Store directory entry: name, address, floor plan.
    StoreBasic,

    /// Store key codes, alarm codes, and access instructions.
    ///
    /// The most sensitive field in the portal; scoped to the staff
    /// actually assigned to the store.
    StoreKeyInfo,

    /// Store cleaning schedule.
    StoreSchedule,

    /// Completed-job reports and photos.
    JobReport,

    /// Staff roster and shift assignments.
    StaffRoster,

    /// Edit the record behind the current page.
    CanEdit,

    /// Hard-delete the record behind the current page.
    CanDelete,
}

impl PermissionKey {
    /// All declared keys.
    pub const ALL: [PermissionKey; 10] = [
        PermissionKey::ClientBasic,
        PermissionKey::ClientContract,
        PermissionKey::ClientBilling,
        PermissionKey::StoreBasic,
        PermissionKey::StoreKeyInfo,
        PermissionKey::StoreSchedule,
        PermissionKey::JobReport,
        PermissionKey::StaffRoster,
        PermissionKey::CanEdit,
        PermissionKey::CanDelete,
    ];

    /// Stable string key used at the binding-layer boundary.
    pub fn key(&self) -> &'static str {
        match self {
            PermissionKey::ClientBasic => "client_basic",
            PermissionKey::ClientContract => "client_contract",
            PermissionKey::ClientBilling => "client_billing",
            PermissionKey::StoreBasic => "store_basic",
            PermissionKey::StoreKeyInfo => "store_key_info",
            PermissionKey::StoreSchedule => "store_schedule",
            PermissionKey::JobReport => "job_report",
            PermissionKey::StaffRoster => "staff_roster",
            PermissionKey::CanEdit => "can_edit",
            PermissionKey::CanDelete => "can_delete",
        }
    }

    /// Parses a string key. Returns `None` for unknown keys.
    pub fn from_key(key: &str) -> Option<PermissionKey> {
        match key {
            "client_basic" => Some(PermissionKey::ClientBasic),
            "client_contract" => Some(PermissionKey::ClientContract),
            "client_billing" => Some(PermissionKey::ClientBilling),
            "store_basic" => Some(PermissionKey::StoreBasic),
            "store_key_info" => Some(PermissionKey::StoreKeyInfo),
            "store_schedule" => Some(PermissionKey::StoreSchedule),
            "job_report" => Some(PermissionKey::JobReport),
            "staff_roster" => Some(PermissionKey::StaffRoster),
            "can_edit" => Some(PermissionKey::CanEdit),
            "can_delete" => Some(PermissionKey::CanDelete),
            _ => None,
        }
    }
}

// ============================================================================
// Access
// ============================================================================

/// Decision value for a (role, key) matrix entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// Granted unconditionally.
    Allow,

    /// Denied unconditionally.
    Deny,

    /// Granted when the principal owns the resource: matching user id
    /// against owner id, or client id against the principal's client.
    OwnerScoped,

    /// Granted when the principal is assigned to the resource: matching
    /// user id against the assignee, or store id against the
    /// principal's assigned-store set.
    AssignmentScoped,
}

impl Default for Access {
    /// Defaults to `Deny` (safe default: deny unless explicitly allowed).
    fn default() -> Self {
        Self::Deny
    }
}

// ============================================================================
// PermissionMatrix
// ============================================================================

/// Per-role, per-key decision table.
///
/// Immutable after construction; build once at startup and share.
/// Lookups for a role without a declared row take the Guest row, and a
/// key missing from a declared row also falls back to the Guest row, so
/// the all-`Deny` Guest row is the floor of the whole table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionMatrix {
    rows: BTreeMap<Role, BTreeMap<PermissionKey, Access>>,
}

impl PermissionMatrix {
    /// Creates a matrix from declared rows.
    pub fn new(rows: BTreeMap<Role, BTreeMap<PermissionKey, Access>>) -> Self {
        Self { rows }
    }

    /// Sets a single entry; used to build custom tables in tests and
    /// staging policies.
    pub fn with_entry(mut self, role: Role, key: PermissionKey, access: Access) -> Self {
        self.rows.entry(role).or_default().insert(key, access);
        self
    }

    /// The standard portal matrix.
    ///
    /// Admin and Developer rows are all-`Allow` for symmetry with the
    /// route bypass; the Guest row is all-`Deny` and anchors every
    /// fallback.
    pub fn standard() -> Self {
        use Access::{Allow, AssignmentScoped, Deny, OwnerScoped};
        use PermissionKey::{
            CanDelete, CanEdit, ClientBasic, ClientBilling, ClientContract, JobReport,
            StaffRoster, StoreBasic, StoreKeyInfo, StoreSchedule,
        };

        let mut matrix = Self::new(BTreeMap::new());

        for key in PermissionKey::ALL {
            matrix = matrix
                .with_entry(Role::Admin, key, Allow)
                .with_entry(Role::Developer, key, Allow)
                .with_entry(Role::Guest, key, Deny);
        }

        let manager: [(PermissionKey, Access); 10] = [
            (ClientBasic, Allow),
            (ClientContract, Allow),
            (ClientBilling, Allow),
            (StoreBasic, Allow),
            (StoreKeyInfo, Allow),
            (StoreSchedule, Allow),
            (JobReport, Allow),
            (StaffRoster, Allow),
            (CanEdit, Allow),
            (CanDelete, Deny),
        ];
        let concierge: [(PermissionKey, Access); 10] = [
            (ClientBasic, Allow),
            (ClientContract, Deny),
            (ClientBilling, Deny),
            (StoreBasic, AssignmentScoped),
            (StoreKeyInfo, Deny),
            (StoreSchedule, AssignmentScoped),
            (JobReport, AssignmentScoped),
            (StaffRoster, AssignmentScoped),
            (CanEdit, Deny),
            (CanDelete, Deny),
        ];
        let staff: [(PermissionKey, Access); 10] = [
            (ClientBasic, Deny),
            (ClientContract, Deny),
            (ClientBilling, Deny),
            (StoreBasic, AssignmentScoped),
            (StoreKeyInfo, AssignmentScoped),
            (StoreSchedule, AssignmentScoped),
            (JobReport, AssignmentScoped),
            (StaffRoster, Deny),
            (CanEdit, Deny),
            (CanDelete, Deny),
        ];
        let customer: [(PermissionKey, Access); 10] = [
            (ClientBasic, OwnerScoped),
            (ClientContract, OwnerScoped),
            (ClientBilling, OwnerScoped),
            (StoreBasic, OwnerScoped),
            (StoreKeyInfo, Deny),
            (StoreSchedule, OwnerScoped),
            (JobReport, OwnerScoped),
            (StaffRoster, Deny),
            (CanEdit, Deny),
            (CanDelete, Deny),
        ];

        for (key, access) in manager {
            matrix = matrix.with_entry(Role::Manager, key, access);
        }
        for (key, access) in concierge {
            matrix = matrix.with_entry(Role::Concierge, key, access);
        }
        for (key, access) in staff {
            matrix = matrix.with_entry(Role::Staff, key, access);
        }
        for (key, access) in customer {
            matrix = matrix.with_entry(Role::Customer, key, access);
        }

        matrix
    }

    /// Looks up the access value for `(role, key)`.
    ///
    /// A missing row or entry falls back to the Guest row; a missing
    /// Guest entry is `Deny`.
    pub fn access(&self, role: Role, key: PermissionKey) -> Access {
        self.rows
            .get(&role)
            .and_then(|row| row.get(&key))
            .or_else(|| self.rows.get(&Role::Guest).and_then(|row| row.get(&key)))
            .copied()
            .unwrap_or_default()
    }

    /// Returns whether every declared role has an entry for every key.
    pub fn is_total(&self) -> bool {
        Role::ALL.iter().all(|role| {
            self.rows.get(role).is_some_and(|row| {
                PermissionKey::ALL.iter().all(|key| row.contains_key(key))
            })
        })
    }
}

impl Default for PermissionMatrix {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// Tests
// ============================================================================
