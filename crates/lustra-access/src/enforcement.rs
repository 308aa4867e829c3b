//! Binding-layer enforcement.
//!
//! Wraps the pure decision functions in a gate that returns typed
//! errors and emits audit events, so page controllers can use `?` to
//! redirect on denial instead of branching on booleans.

use thiserror::Error;
use tracing::{info, warn};

use crate::config::AccessConfig;
use crate::context::PrincipalContext;
use crate::permissions::PermissionKey;

/// Error type for enforcement operations.
#[derive(Debug, Error)]
pub enum AccessError {
    /// Navigation denied by the route table.
    #[error("route access denied: {role} may not navigate to {path}")]
    RouteDenied { path: String, role: String },

    /// Permission denied by the matrix/context.
    #[error("permission denied: {role} lacks {key}")]
    PermissionDenied { key: &'static str, role: String },
}

/// Result type for enforcement operations.
pub type Result<T> = std::result::Result<T, AccessError>;

/// Enforcement gate over an [`AccessConfig`].
///
/// Stateless beyond the config reference and the audit switch; build
/// one per consumer or share one, either works.
pub struct AccessGate<'a> {
    config: &'a AccessConfig,

    /// Whether to log access attempts.
    audit_enabled: bool,
}

impl<'a> AccessGate<'a> {
    /// Creates a gate over the given config.
    pub fn new(config: &'a AccessConfig) -> Self {
        Self {
            config,
            audit_enabled: true,
        }
    }

    /// Disables audit logging (for testing).
    pub fn without_audit(mut self) -> Self {
        self.audit_enabled = false;
        self
    }

    /// Enforces route access for a session role identifier.
    ///
    /// **Audit:** logs all attempts.
    pub fn enforce_route(&self, path: &str, role_ident: &str) -> Result<()> {
        let allowed = self.config.resolve(path, role_ident);

        if self.audit_enabled {
            if allowed {
                info!(path = %path, role = %role_ident, "Route access granted");
            } else {
                warn!(path = %path, role = %role_ident, "Route access denied");
            }
        }

        if allowed {
            Ok(())
        } else {
            Err(AccessError::RouteDenied {
                path: path.to_string(),
                role: role_ident.to_string(),
            })
        }
    }

    /// Enforces a permission for the given context.
    ///
    /// **Audit:** logs the decision with its reason.
    pub fn enforce_permission(&self, key: PermissionKey, context: &PrincipalContext) -> Result<()> {
        let decision = self.config.decision(key, context);

        if self.audit_enabled {
            if decision.granted {
                info!(
                    key = %key.key(),
                    role = %context.role.ident(),
                    reason = %decision.reason,
                    "Permission granted"
                );
            } else {
                warn!(
                    key = %key.key(),
                    role = %context.role.ident(),
                    reason = %decision.reason,
                    "Permission denied"
                );
            }
        }

        if decision.granted {
            Ok(())
        } else {
            Err(AccessError::PermissionDenied {
                key: key.key(),
                role: context.role.ident().to_string(),
            })
        }
    }

    /// Filters a requested key list down to the granted subset.
    ///
    /// Page templates pass every key they guard and render only what
    /// comes back.
    ///
    /// **Audit:** logs denied keys (if any).
    pub fn visible_keys(
        &self,
        keys: &[PermissionKey],
        context: &PrincipalContext,
    ) -> Vec<PermissionKey> {
        let granted: Vec<PermissionKey> = keys
            .iter()
            .filter(|key| self.config.evaluate_key(**key, context))
            .copied()
            .collect();

        if self.audit_enabled {
            let denied: Vec<&'static str> = keys
                .iter()
                .filter(|key| !self.config.evaluate_key(**key, context))
                .map(PermissionKey::key)
                .collect();

            if !denied.is_empty() {
                warn!(
                    role = %context.role.ident(),
                    denied_keys = ?denied,
                    "Keys filtered by policy"
                );
            }
        }

        granted
    }

    /// The underlying config.
    pub fn config(&self) -> &AccessConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use crate::roles::Role;

    use super::*;

    #[test]
    fn test_enforce_route_allowed() {
        let config = AccessConfig::standard();
        let gate = AccessGate::new(&config).without_audit();

        assert!(gate.enforce_route("/stores/s-1.html", "staff").is_ok());
        assert!(gate.enforce_route("/anything-at-all", "admin").is_ok());
    }

    #[test]
    fn test_enforce_route_denied() {
        let config = AccessConfig::standard();
        let gate = AccessGate::new(&config).without_audit();

        let result = gate.enforce_route("/manage/payroll.html", "staff");
        match result {
            Err(AccessError::RouteDenied { path, role }) => {
                assert_eq!(path, "/manage/payroll.html");
                assert_eq!(role, "staff");
            }
            _ => panic!("Expected RouteDenied error"),
        }
    }

    #[test]
    fn test_enforce_permission() {
        let config = AccessConfig::standard();
        let gate = AccessGate::new(&config).without_audit();

        let manager = PrincipalContext::new(Role::Manager);
        assert!(gate
            .enforce_permission(PermissionKey::ClientContract, &manager)
            .is_ok());

        let result = gate.enforce_permission(PermissionKey::CanDelete, &manager);
        match result {
            Err(AccessError::PermissionDenied { key, role }) => {
                assert_eq!(key, "can_delete");
                assert_eq!(role, "manager");
            }
            _ => panic!("Expected PermissionDenied error"),
        }
    }

    #[test]
    fn test_visible_keys() {
        let config = AccessConfig::standard();
        let gate = AccessGate::new(&config).without_audit();

        let ctx = PrincipalContext::new(Role::Staff)
            .with_store("S1")
            .with_assigned_stores(["S1"]);

        let requested = [
            PermissionKey::StoreBasic,
            PermissionKey::StoreKeyInfo,
            PermissionKey::ClientContract,
            PermissionKey::CanDelete,
        ];
        let visible = gate.visible_keys(&requested, &ctx);

        assert_eq!(
            visible,
            vec![PermissionKey::StoreBasic, PermissionKey::StoreKeyInfo]
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AccessError::RouteDenied {
            path: "/admin/".to_string(),
            role: "guest".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "route access denied: guest may not navigate to /admin/"
        );

        let err = AccessError::PermissionDenied {
            key: "store_key_info",
            role: "customer".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "permission denied: customer lacks store_key_info"
        );
    }
}
