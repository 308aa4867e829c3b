//! Evaluation context for permission decisions.
//!
//! A [`PrincipalContext`] is the caller-supplied snapshot of who is
//! asking and what resource the current page shows. It is built fresh
//! from session data for each navigation/render event and discarded
//! after use; the engine never stores one.

use std::collections::BTreeSet;

use lustra_types::{ClientId, StoreId, UserId};
use serde::{Deserialize, Serialize};

use crate::roles::Role;

/// Per-evaluation principal and resource context.
///
/// Every field beyond the role is optional. Absence is represented with
/// `None` and is distinct from an empty string: an unset owner id means
/// "the page carries no ownership data", while an empty-string owner id
/// is a present value that simply matches nothing sensible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalContext {
    /// The active session role.
    pub role: Role,

    /// The signed-in user's id.
    pub current_user_id: Option<UserId>,

    /// Owner of the resource on the current page.
    pub owner_id: Option<UserId>,

    /// The client organization the signed-in user belongs to.
    pub user_client_id: Option<ClientId>,

    /// The client organization the current page's resource belongs to.
    pub client_id: Option<ClientId>,

    /// The user the current page's resource is assigned to.
    pub assigned_to: Option<UserId>,

    /// The store the current page's resource belongs to.
    pub store_id: Option<StoreId>,

    /// The signed-in user's assigned stores.
    pub assigned_stores: Option<BTreeSet<StoreId>>,
}

impl PrincipalContext {
    /// Creates a context with only the role set.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            current_user_id: None,
            owner_id: None,
            user_client_id: None,
            client_id: None,
            assigned_to: None,
            store_id: None,
            assigned_stores: None,
        }
    }

    /// Creates a context from a session role identifier.
    ///
    /// Unknown identifiers degrade to [`Role::Guest`].
    pub fn for_ident(ident: &str) -> Self {
        Self::new(Role::from_ident_or_guest(ident))
    }

    /// Sets the signed-in user's id.
    pub fn with_user(mut self, id: impl Into<UserId>) -> Self {
        self.current_user_id = Some(id.into());
        self
    }

    /// Sets the resource owner's id.
    pub fn with_owner(mut self, id: impl Into<UserId>) -> Self {
        self.owner_id = Some(id.into());
        self
    }

    /// Sets the signed-in user's client organization.
    pub fn with_user_client(mut self, id: impl Into<ClientId>) -> Self {
        self.user_client_id = Some(id.into());
        self
    }

    /// Sets the resource's client organization.
    pub fn with_client(mut self, id: impl Into<ClientId>) -> Self {
        self.client_id = Some(id.into());
        self
    }

    /// Sets the resource's assignee.
    pub fn with_assignee(mut self, id: impl Into<UserId>) -> Self {
        self.assigned_to = Some(id.into());
        self
    }

    /// Sets the resource's store.
    pub fn with_store(mut self, id: impl Into<StoreId>) -> Self {
        self.store_id = Some(id.into());
        self
    }

    /// Sets the signed-in user's assigned-store set.
    pub fn with_assigned_stores<I, S>(mut self, stores: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StoreId>,
    {
        self.assigned_stores = Some(stores.into_iter().map(Into::into).collect());
        self
    }
}
