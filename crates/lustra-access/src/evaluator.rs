//! Permission evaluation.
//!
//! Resolves a single permission decision from the matrix value and the
//! caller-supplied [`PrincipalContext`]. Pure and total: no I/O, no
//! panics, and any missing context field is treated as "absent" rather
//! than an error.
//!
//! Scoped values carry a deliberate permissive fallback: when a page
//! supplies *no* ownership (or assignment) signal at all, the scoped
//! permission grants. This preserves the portal's current behavior for
//! principals with incomplete session context and is pinned by tests;
//! hardening it to default-deny would change which UI elements render
//! today and needs an explicit product decision first.

use crate::context::PrincipalContext;
use crate::permissions::{Access, PermissionKey, PermissionMatrix};

// ============================================================================
// Decision
// ============================================================================

/// The result of evaluating a permission with its audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Whether the permission is granted.
    pub granted: bool,
    /// The matrix value the decision was derived from.
    pub access: Access,
    /// Human-readable explanation of why this decision was made.
    pub reason: String,
}

// ============================================================================
// Public API
// ============================================================================

/// Evaluates a permission for the given context.
///
/// Looks up the matrix value for `(context.role, key)` (guest-row
/// fallback for undeclared roles) and resolves scoped values against
/// the context's ownership/assignment fields.
pub fn evaluate(matrix: &PermissionMatrix, key: PermissionKey, context: &PrincipalContext) -> bool {
    match matrix.access(context.role, key) {
        Access::Allow => true,
        Access::Deny => false,
        Access::OwnerScoped => scope_grants(&owner_signals(context)),
        Access::AssignmentScoped => scope_grants(&assignment_signals(context)),
    }
}

/// Evaluates a permission and explains the outcome.
///
/// Same decision as [`evaluate`]; the reason string is meant for audit
/// logs, not for display to end users.
pub fn evaluate_with_reason(
    matrix: &PermissionMatrix,
    key: PermissionKey,
    context: &PrincipalContext,
) -> Decision {
    let access = matrix.access(context.role, key);
    let (granted, reason) = match access {
        Access::Allow => (true, format!("{} allows {}", context.role.ident(), key.key())),
        Access::Deny => (false, format!("{} denies {}", context.role.ident(), key.key())),
        Access::OwnerScoped => scope_decision(&owner_signals(context), "ownership"),
        Access::AssignmentScoped => scope_decision(&assignment_signals(context), "assignment"),
    };
    Decision {
        granted,
        access,
        reason,
    }
}

// ============================================================================
// Scope signals
// ============================================================================

/// Ownership signals: user-vs-owner and client-vs-client pair matches.
///
/// Each entry is `None` when the pair is not fully present in the
/// context, `Some(matched)` otherwise.
fn owner_signals(context: &PrincipalContext) -> [Option<bool>; 2] {
    let user_pair = match (&context.owner_id, &context.current_user_id) {
        (Some(owner), Some(user)) => Some(owner == user),
        _ => None,
    };
    let client_pair = match (&context.client_id, &context.user_client_id) {
        (Some(client), Some(user_client)) => Some(client == user_client),
        _ => None,
    };
    [user_pair, client_pair]
}

/// Assignment signals: user-vs-assignee match and store membership.
fn assignment_signals(context: &PrincipalContext) -> [Option<bool>; 2] {
    let assignee_pair = match (&context.assigned_to, &context.current_user_id) {
        (Some(assignee), Some(user)) => Some(assignee == user),
        _ => None,
    };
    let store_member = match (&context.store_id, &context.assigned_stores) {
        (Some(store), Some(assigned)) => Some(assigned.contains(store)),
        _ => None,
    };
    [assignee_pair, store_member]
}

/// Resolves a scoped value from its signals.
///
/// Grants when any present signal matches, or when no signal is present
/// at all (permissive fallback). A present-but-mismatched signal with
/// no matching sibling denies.
fn scope_grants(signals: &[Option<bool>; 2]) -> bool {
    if signals.iter().any(|signal| *signal == Some(true)) {
        return true;
    }
    signals.iter().all(Option::is_none)
}

fn scope_decision(signals: &[Option<bool>; 2], scope: &str) -> (bool, String) {
    if signals.iter().any(|signal| *signal == Some(true)) {
        (true, format!("{scope} match"))
    } else if signals.iter().all(Option::is_none) {
        (
            true,
            format!("permissive fallback: no {scope} context present"),
        )
    } else {
        (false, format!("{scope} mismatch"))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::roles::Role;

    use super::*;

    fn matrix() -> PermissionMatrix {
        PermissionMatrix::standard()
    }

    #[test]
    fn test_allow_and_deny_ignore_context() {
        let ctx = PrincipalContext::new(Role::Manager);
        assert!(evaluate(&matrix(), PermissionKey::ClientContract, &ctx));
        assert!(!evaluate(&matrix(), PermissionKey::CanDelete, &ctx));
    }

    #[test]
    fn test_concierge_denied_client_contract() {
        let ctx = PrincipalContext::new(Role::Concierge);
        assert!(!evaluate(&matrix(), PermissionKey::ClientContract, &ctx));
    }

    #[test]
    fn test_assignment_scope_store_membership() {
        let assigned = PrincipalContext::new(Role::Staff)
            .with_store("S1")
            .with_assigned_stores(["S1", "S2"]);
        assert!(evaluate(&matrix(), PermissionKey::StoreBasic, &assigned));

        let unassigned = PrincipalContext::new(Role::Staff)
            .with_store("S1")
            .with_assigned_stores(["S3"]);
        assert!(!evaluate(&matrix(), PermissionKey::StoreBasic, &unassigned));
    }

    #[test]
    fn test_assignment_scope_assignee_match() {
        let ctx = PrincipalContext::new(Role::Staff)
            .with_user("u_17")
            .with_assignee("u_17");
        assert!(evaluate(&matrix(), PermissionKey::JobReport, &ctx));

        let other = PrincipalContext::new(Role::Staff)
            .with_user("u_17")
            .with_assignee("u_99");
        assert!(!evaluate(&matrix(), PermissionKey::JobReport, &other));
    }

    #[test]
    fn test_either_assignment_signal_grants() {
        // Assignee mismatches but store membership holds.
        let ctx = PrincipalContext::new(Role::Staff)
            .with_user("u_17")
            .with_assignee("u_99")
            .with_store("S1")
            .with_assigned_stores(["S1"]);
        assert!(evaluate(&matrix(), PermissionKey::JobReport, &ctx));
    }

    #[test]
    fn test_owner_scope_user_match() {
        let ctx = PrincipalContext::new(Role::Customer)
            .with_user("u_5")
            .with_owner("u_5");
        assert!(evaluate(&matrix(), PermissionKey::ClientBasic, &ctx));

        let other = PrincipalContext::new(Role::Customer)
            .with_user("u_5")
            .with_owner("u_6");
        assert!(!evaluate(&matrix(), PermissionKey::ClientBasic, &other));
    }

    #[test]
    fn test_owner_scope_client_match() {
        let ctx = PrincipalContext::new(Role::Customer)
            .with_user_client("acme")
            .with_client("acme");
        assert!(evaluate(&matrix(), PermissionKey::ClientBilling, &ctx));

        let other = PrincipalContext::new(Role::Customer)
            .with_user_client("acme")
            .with_client("globex");
        assert!(!evaluate(&matrix(), PermissionKey::ClientBilling, &other));
    }

    #[test]
    fn test_permissive_fallback_pins_current_behavior() {
        // No ownership fields at all: the scoped permission grants.
        let ctx = PrincipalContext::new(Role::Customer);
        assert!(evaluate(&matrix(), PermissionKey::ClientBasic, &ctx));

        // Same for assignment scope with no assignment fields.
        let staff = PrincipalContext::new(Role::Staff);
        assert!(evaluate(&matrix(), PermissionKey::StoreBasic, &staff));
    }

    #[test]
    fn test_half_present_pair_is_not_a_signal() {
        // Owner id with no signed-in user: the pair is incomplete, so
        // the fallback applies.
        let ctx = PrincipalContext::new(Role::Customer).with_owner("u_5");
        assert!(evaluate(&matrix(), PermissionKey::ClientBasic, &ctx));

        // Store id with no assigned-store set: same.
        let staff = PrincipalContext::new(Role::Staff).with_store("S1");
        assert!(evaluate(&matrix(), PermissionKey::StoreBasic, &staff));
    }

    #[test]
    fn test_empty_assigned_store_set_denies() {
        // An empty set is present (distinct from absent) and contains
        // nothing, so membership fails.
        let ctx = PrincipalContext::new(Role::Staff)
            .with_store("S1")
            .with_assigned_stores::<[&str; 0], &str>([]);
        assert!(!evaluate(&matrix(), PermissionKey::StoreBasic, &ctx));
    }

    #[test]
    fn test_decision_reasons() {
        let allow = evaluate_with_reason(
            &matrix(),
            PermissionKey::ClientContract,
            &PrincipalContext::new(Role::Manager),
        );
        assert!(allow.granted);
        assert_eq!(allow.access, Access::Allow);
        assert!(allow.reason.contains("manager"));

        let fallback = evaluate_with_reason(
            &matrix(),
            PermissionKey::ClientBasic,
            &PrincipalContext::new(Role::Customer),
        );
        assert!(fallback.granted);
        assert_eq!(fallback.access, Access::OwnerScoped);
        assert!(fallback.reason.contains("permissive fallback"));

        let mismatch = evaluate_with_reason(
            &matrix(),
            PermissionKey::StoreBasic,
            &PrincipalContext::new(Role::Staff)
                .with_store("S1")
                .with_assigned_stores(["S3"]),
        );
        assert!(!mismatch.granted);
        assert!(mismatch.reason.contains("assignment mismatch"));
    }

    #[test]
    fn test_decision_agrees_with_evaluate() {
        let contexts = [
            PrincipalContext::new(Role::Customer),
            PrincipalContext::new(Role::Staff)
                .with_store("S1")
                .with_assigned_stores(["S1"]),
            PrincipalContext::new(Role::Guest),
            PrincipalContext::new(Role::Admin),
        ];
        for ctx in &contexts {
            for key in PermissionKey::ALL {
                assert_eq!(
                    evaluate(&matrix(), key, ctx),
                    evaluate_with_reason(&matrix(), key, ctx).granted
                );
            }
        }
    }

    prop_compose! {
        fn arb_context()(
            role_index in 0usize..Role::ALL.len(),
            user in proptest::option::of("[a-z0-9_]{0,6}"),
            owner in proptest::option::of("[a-z0-9_]{0,6}"),
            user_client in proptest::option::of("[a-z0-9_]{0,6}"),
            client in proptest::option::of("[a-z0-9_]{0,6}"),
            assignee in proptest::option::of("[a-z0-9_]{0,6}"),
            store in proptest::option::of("[a-z0-9_]{0,6}"),
            assigned in proptest::option::of(proptest::collection::vec("[a-z0-9_]{0,6}", 0..4)),
        ) -> PrincipalContext {
            let mut ctx = PrincipalContext::new(Role::ALL[role_index]);
            ctx.current_user_id = user.map(Into::into);
            ctx.owner_id = owner.map(Into::into);
            ctx.user_client_id = user_client.map(Into::into);
            ctx.client_id = client.map(Into::into);
            ctx.assigned_to = assignee.map(Into::into);
            ctx.store_id = store.map(Into::into);
            ctx.assigned_stores =
                assigned.map(|stores| stores.into_iter().map(Into::into).collect());
            ctx
        }
    }

    proptest! {
        #[test]
        fn prop_evaluate_is_total(ctx in arb_context(), key_index in 0usize..PermissionKey::ALL.len()) {
            // Never panics, and the explained decision always agrees.
            let key = PermissionKey::ALL[key_index];
            let matrix = PermissionMatrix::standard();
            let granted = evaluate(&matrix, key, &ctx);
            prop_assert_eq!(granted, evaluate_with_reason(&matrix, key, &ctx).granted);
        }

        #[test]
        fn prop_guest_never_granted(ctx in arb_context(), key_index in 0usize..PermissionKey::ALL.len()) {
            let mut ctx = ctx;
            ctx.role = Role::Guest;
            let key = PermissionKey::ALL[key_index];
            prop_assert!(!evaluate(&PermissionMatrix::standard(), key, &ctx));
        }
    }
}
