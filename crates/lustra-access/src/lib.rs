//! # lustra-access: Role-Based Access Control
//!
//! The access-control policy engine for the Lustra operations portal:
//! - **Route gating** (ordered path rules, first match wins)
//! - **Role hierarchy** (declared closures; admin/developer bypass)
//! - **Permission matrix** (per-role, per-key decisions with
//!   ownership- and assignment-scoped values)
//! - **Enforcement gate** (typed errors + audit logging for page
//!   controllers)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Navigation / render event                   │
//! └─────────────────┬───────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  AccessConfig (immutable, built at startup)  │
//! │  ├─ RouteTable: resolve(path, role)          │
//! │  └─ PermissionMatrix: evaluate(key, context) │
//! └─────────────────┬───────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  Binding layer                               │
//! │  - redirect on denied routes                 │
//! │  - hide elements on denied permissions       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Both entry points are pure, synchronous functions over the static
//! tables plus a per-call [`PrincipalContext`]; the engine holds no
//! session state and performs no I/O. Policy here is advisory (it
//! drives what the portal shows); the backend still authorizes every
//! API call on its own.
//!
//! ## Roles
//!
//! | Role      | Routes           | Client data  | Store data      |
//! |-----------|------------------|--------------|-----------------|
//! | Guest     | public pages     | ✗            | ✗               |
//! | Customer  | customer portal  | own client   | own client      |
//! | Staff     | store + job pages| ✗            | assigned stores |
//! | Concierge | + schedule pages | directory    | assigned stores |
//! | Manager   | + management     | ✓            | ✓               |
//! | Developer | all (bypass)     | ✓            | ✓               |
//! | Admin     | all (bypass)     | ✓            | ✓               |
//!
//! ## Examples
//!
//! ### Route gating
//!
//! ```
//! use lustra_access::AccessConfig;
//!
//! let config = AccessConfig::standard();
//!
//! // Field staff reach store pages; customers do not.
//! assert!(config.resolve("/stores/s-100.html", "staff"));
//! assert!(!config.resolve("/stores/s-100.html", "customer"));
//!
//! // Admin and developer bypass the rules entirely.
//! assert!(config.resolve("/totally-unlisted-page.html", "admin"));
//!
//! // Unknown session roles degrade to guest.
//! assert!(!config.resolve("/manage/", "superuser"));
//! ```
//!
//! ### Permission evaluation
//!
//! ```
//! use lustra_access::{AccessConfig, PrincipalContext, Role};
//!
//! let config = AccessConfig::standard();
//!
//! let ctx = PrincipalContext::new(Role::Staff)
//!     .with_store("s-100")
//!     .with_assigned_stores(["s-100", "s-200"]);
//!
//! // Assignment-scoped: granted because s-100 is on the list.
//! assert!(config.evaluate("store_key_info", &ctx));
//!
//! // Concierges never see key info, assigned or not.
//! assert!(!config.evaluate("store_key_info", &PrincipalContext::new(Role::Concierge)));
//! ```
//!
//! ### Enforcement
//!
//! ```
//! use lustra_access::{AccessConfig, AccessGate, PermissionKey, PrincipalContext, Role};
//!
//! let config = AccessConfig::standard();
//! let gate = AccessGate::new(&config);
//!
//! gate.enforce_route("/stores/s-100.html", "staff")?;
//!
//! let ctx = PrincipalContext::new(Role::Manager);
//! gate.enforce_permission(PermissionKey::ClientContract, &ctx)?;
//!
//! // Page templates render only the keys that come back.
//! let visible = gate.visible_keys(
//!     &[PermissionKey::ClientContract, PermissionKey::CanDelete],
//!     &ctx,
//! );
//! assert_eq!(visible, vec![PermissionKey::ClientContract]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod context;
pub mod enforcement;
pub mod evaluator;
pub mod hierarchy;
pub mod permissions;
pub mod roles;
pub mod routes;

// Re-export commonly used types
pub use config::AccessConfig;
pub use context::PrincipalContext;
pub use enforcement::{AccessError, AccessGate};
pub use evaluator::{Decision, evaluate, evaluate_with_reason};
pub use hierarchy::{RoleGraph, RoleRegistry};
pub use permissions::{Access, PermissionKey, PermissionMatrix};
pub use roles::Role;
pub use routes::{PathPattern, PathRule, RouteTable};

// Kani proofs for bounded model checking
#[cfg(kani)]
mod kani_proofs;
