// Folio
// Copyright (C) 2025 Folio Contributors

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Permission store
//!
//! Holds the authenticated user's permission set, role set and
//! system-admin flag as reported by the backend's "who am I" endpoint.
//! The store is populated by `load()` after login and emptied by
//! `clear()` on logout or on a failed load (fail-closed). Evaluation
//! always works on a cloned snapshot.

use crate::error::ConsoleResult;
use crate::session::SessionFlags;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::sync::watch;
use tracing::{debug, warn};

/// A role associated with the current user, display/grouping only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRef {
    /// Role name as reported by the backend
    pub name: String,
}

/// Wire shape of `GET /api/users/me/permissions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MePermissions {
    pub permissions: Vec<String>,
    pub roles: Vec<RoleRef>,
    pub is_systemadmin: bool,
}

/// Source of the current user's permission payload
#[async_trait]
pub trait PermissionsSource: Send + Sync {
    /// Fetch the "who am I" permissions payload
    async fn me_permissions(&self) -> ConsoleResult<MePermissions>;
}

/// Immutable view of the authentication state at one instant.
///
/// While `loading` is true, callers must treat every check as unknown and
/// render a neutral loading state, never denied and never allowed.
#[derive(Debug, Clone, Default)]
pub struct AuthSnapshot {
    /// Whether a session flag is currently present
    pub authenticated: bool,

    /// Whether a permission load is in flight
    pub loading: bool,

    /// Short-circuits every permission check to granted
    pub system_admin: bool,

    /// Permission names granted to the user
    pub permissions: HashSet<String>,

    /// Roles associated with the user
    pub roles: Vec<RoleRef>,
}

impl AuthSnapshot {
    /// Snapshot for a known permission set, used by tests and fixtures
    pub fn with_permissions<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            authenticated: true,
            loading: false,
            system_admin: false,
            permissions: permissions.into_iter().map(Into::into).collect(),
            roles: Vec::new(),
        }
    }

    /// Snapshot for a system administrator
    pub fn system_admin() -> Self {
        Self {
            authenticated: true,
            system_admin: true,
            ..Self::default()
        }
    }
}

struct StoreState {
    loading: bool,
    system_admin: bool,
    permissions: HashSet<String>,
    roles: Vec<RoleRef>,
    load_error: Option<String>,
}

impl StoreState {
    fn empty() -> Self {
        Self {
            loading: false,
            system_admin: false,
            permissions: HashSet::new(),
            roles: Vec::new(),
            load_error: None,
        }
    }
}

/// Process-wide permission store with an explicit load/clear lifecycle.
///
/// Injected where needed rather than reached through a module-level
/// singleton, so tests can substitute a fixed snapshot.
pub struct PermissionStore {
    source: Arc<dyn PermissionsSource>,
    flags: Arc<dyn SessionFlags>,
    state: Arc<RwLock<StoreState>>,
}

impl PermissionStore {
    /// Create an empty store
    pub fn new(source: Arc<dyn PermissionsSource>, flags: Arc<dyn SessionFlags>) -> Self {
        Self {
            source,
            flags,
            state: Arc::new(RwLock::new(StoreState::empty())),
        }
    }

    /// Whether a session flag is currently present, independent of
    /// whether permissions have finished loading
    pub fn is_authenticated(&self) -> bool {
        self.flags.is_authenticated()
    }

    /// Replace the held permission set from the backend.
    ///
    /// On failure the store is emptied and the error recorded: a user
    /// whose permissions cannot be determined has none.
    pub async fn load(&self) -> ConsoleResult<()> {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.load_error = None;
        }

        match self.source.me_permissions().await {
            Ok(payload) => {
                let mut state = self.state.write().await;
                state.permissions = payload.permissions.into_iter().collect();
                state.roles = payload.roles;
                state.system_admin = payload.is_systemadmin;
                state.loading = false;

                debug!(
                    permission_count = state.permissions.len(),
                    role_count = state.roles.len(),
                    system_admin = state.system_admin,
                    "Permission store loaded"
                );

                Ok(())
            }
            Err(err) => {
                let mut state = self.state.write().await;
                *state = StoreState::empty();
                state.load_error = Some(err.to_string());

                warn!(error = %err, "Permission load failed, store emptied");

                Err(err)
            }
        }
    }

    /// Empty the store, e.g. on logout
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        *state = StoreState::empty();
    }

    /// Message of the last failed load, if any
    pub async fn load_error(&self) -> Option<String> {
        self.state.read().await.load_error.clone()
    }

    /// Clone the current authentication state
    pub async fn snapshot(&self) -> AuthSnapshot {
        let state = self.state.read().await;

        AuthSnapshot {
            authenticated: self.flags.is_authenticated(),
            loading: state.loading,
            system_admin: state.system_admin,
            permissions: state.permissions.clone(),
            roles: state.roles.clone(),
        }
    }

    /// Follow session transitions: load on login, clear on logout.
    ///
    /// The receiver comes from a [`crate::session::SessionWatcher`]; a
    /// failed load leaves the store empty, which `load()` already logged.
    pub fn spawn_session_listener(self: &Arc<Self>, mut rx: watch::Receiver<bool>) -> tokio::task::JoinHandle<()> {
        let store = Arc::clone(self);

        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let authenticated = *rx.borrow();
                if authenticated {
                    let _ = store.load().await;
                } else {
                    store.clear().await;
                }
            }
        })
    }
}
