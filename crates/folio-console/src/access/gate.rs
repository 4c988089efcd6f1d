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

//! Gate components
//!
//! Declarative wrappers deciding whether a page region renders its
//! content, its fallback, a neutral loading state, or a denial notice.
//! Both gates share one state machine: Loading, Unauthenticated, Denied,
//! Allowed. Decisions are recomputed from the snapshot on every
//! evaluation and never cached, so a permission revocation takes effect
//! on the next render without manual invalidation.
//!
//! Unauthenticated users get the fallback, never a denial notice: login
//! routing is the outer shell's job, and permission-denied chrome must
//! not leak to logged-out visitors.

use crate::access::evaluator::AccessEvaluator;
use crate::access::requirement::{GENERIC_DENIAL, module_denial_message};

/// Gate state for the current snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Loading,
    Unauthenticated,
    Denied,
    Allowed,
}

/// What the shell should render for a gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateRender {
    /// Render the gated content
    Content,

    /// Render the caller-supplied fallback, or nothing without one
    Fallback,

    /// Render a neutral loading indicator
    Spinner,

    /// Render an inline denial panel with this message
    DeniedNotice(String),
}

/// Evaluated gate outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDecision {
    pub state: GateState,
    pub render: GateRender,
}

fn precondition(evaluator: &AccessEvaluator<'_>, has_fallback: bool) -> Option<GateDecision> {
    let snapshot = evaluator.snapshot();

    if snapshot.loading {
        let render = if has_fallback { GateRender::Fallback } else { GateRender::Spinner };
        return Some(GateDecision {
            state: GateState::Loading,
            render,
        });
    }

    if !snapshot.authenticated {
        return Some(GateDecision {
            state: GateState::Unauthenticated,
            render: GateRender::Fallback,
        });
    }

    None
}

fn denial(show_error: bool, message: String) -> GateDecision {
    let render = if show_error { GateRender::DeniedNotice(message) } else { GateRender::Fallback };

    GateDecision {
        state: GateState::Denied,
        render,
    }
}

/// Gates a region on module access, optionally on one operation within
/// the module
#[derive(Debug, Clone)]
pub struct ModuleGate {
    module: String,
    operation: Option<String>,
    has_fallback: bool,
    show_error: bool,
    error_message: Option<String>,
}

impl ModuleGate {
    /// Gate on access to a module
    pub fn new<S: Into<String>>(module: S) -> Self {
        Self {
            module: module.into(),
            operation: None,
            has_fallback: false,
            show_error: false,
            error_message: None,
        }
    }

    /// Gate on one operation within the module instead of plain access
    pub fn with_operation<S: Into<String>>(mut self, operation: S) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Declare that the caller supplies fallback content
    pub fn with_fallback(mut self) -> Self {
        self.has_fallback = true;
        self
    }

    /// Render a denial notice instead of the fallback when denied
    pub fn with_error(mut self) -> Self {
        self.show_error = true;
        self
    }

    /// Override the generated denial message
    pub fn with_error_message<S: Into<String>>(mut self, message: S) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// The gated module key
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Decide what to render for the given snapshot
    pub fn evaluate(&self, evaluator: &AccessEvaluator<'_>) -> GateDecision {
        if let Some(decision) = precondition(evaluator, self.has_fallback) {
            return decision;
        }

        let allowed = match &self.operation {
            Some(operation) => evaluator.can_perform_operation(operation, &self.module),
            None => evaluator.can_access_module(&self.module),
        };

        if allowed {
            GateDecision {
                state: GateState::Allowed,
                render: GateRender::Content,
            }
        } else {
            let message = self.error_message.clone().unwrap_or_else(|| module_denial_message(&self.module));
            denial(self.show_error, message)
        }
    }
}

/// Gates a region on one permission or a quantified permission list
#[derive(Debug, Clone)]
pub struct PermissionGate {
    permissions: Vec<String>,
    require_all: bool,
    has_fallback: bool,
    show_error: bool,
    error_message: Option<String>,
}

impl PermissionGate {
    /// Gate on a single permission
    pub fn new<S: Into<String>>(permission: S) -> Self {
        Self {
            permissions: vec![permission.into()],
            require_all: false,
            has_fallback: false,
            show_error: false,
            error_message: None,
        }
    }

    /// Gate on any of the listed permissions
    pub fn any_of<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            permissions: permissions.into_iter().map(Into::into).collect(),
            require_all: false,
            has_fallback: false,
            show_error: false,
            error_message: None,
        }
    }

    /// Gate on every listed permission
    pub fn all_of<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            require_all: true,
            ..Self::any_of(permissions)
        }
    }

    /// Declare that the caller supplies fallback content
    pub fn with_fallback(mut self) -> Self {
        self.has_fallback = true;
        self
    }

    /// Render a denial notice instead of the fallback when denied
    pub fn with_error(mut self) -> Self {
        self.show_error = true;
        self
    }

    /// Override the generated denial message
    pub fn with_error_message<S: Into<String>>(mut self, message: S) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Decide what to render for the given snapshot
    pub fn evaluate(&self, evaluator: &AccessEvaluator<'_>) -> GateDecision {
        if let Some(decision) = precondition(evaluator, self.has_fallback) {
            return decision;
        }

        let allowed = if self.require_all {
            evaluator.has_all_permissions(&self.permissions)
        } else {
            evaluator.has_any_permission(&self.permissions)
        };

        if allowed {
            GateDecision {
                state: GateState::Allowed,
                render: GateRender::Content,
            }
        } else {
            let message = self.error_message.clone().unwrap_or_else(|| GENERIC_DENIAL.to_string());
            denial(self.show_error, message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::aliases::ManageAliasTable;
    use crate::access::modules::ModuleRegistry;
    use crate::access::store::AuthSnapshot;

    fn tables() -> (ManageAliasTable, ModuleRegistry) {
        (ManageAliasTable::default_catalog(), ModuleRegistry::default_catalog())
    }

    #[test]
    fn test_loading_renders_spinner_regardless_of_outcome() {
        let (aliases, modules) = tables();
        let snapshot = AuthSnapshot {
            loading: true,
            ..AuthSnapshot::system_admin()
        };
        let eval = AccessEvaluator::new(&snapshot, &aliases, &modules);

        let decision = ModuleGate::new("projects").evaluate(&eval);
        assert_eq!(decision.state, GateState::Loading);
        assert_eq!(decision.render, GateRender::Spinner);

        let decision = ModuleGate::new("projects").with_fallback().evaluate(&eval);
        assert_eq!(decision.render, GateRender::Fallback);
    }

    #[test]
    fn test_unauthenticated_renders_fallback_never_error() {
        let (aliases, modules) = tables();
        let snapshot = AuthSnapshot::default();
        let eval = AccessEvaluator::new(&snapshot, &aliases, &modules);

        let decision = ModuleGate::new("projects").with_error().evaluate(&eval);

        assert_eq!(decision.state, GateState::Unauthenticated);
        assert_eq!(decision.render, GateRender::Fallback);
    }

    #[test]
    fn test_denied_module_with_error_notice() {
        let (aliases, modules) = tables();
        let snapshot = AuthSnapshot::with_permissions(["VIEW_SKILLS"]);
        let eval = AccessEvaluator::new(&snapshot, &aliases, &modules);

        let decision = ModuleGate::new("projects").with_error().evaluate(&eval);

        assert_eq!(decision.state, GateState::Denied);
        assert_eq!(decision.render, GateRender::DeniedNotice("You don't have permission to view projects".to_string()));
    }

    #[test]
    fn test_denied_without_error_renders_fallback() {
        let (aliases, modules) = tables();
        let snapshot = AuthSnapshot::with_permissions(["VIEW_SKILLS"]);
        let eval = AccessEvaluator::new(&snapshot, &aliases, &modules);

        let decision = ModuleGate::new("projects").with_fallback().evaluate(&eval);
        assert_eq!(decision.render, GateRender::Fallback);
    }

    #[test]
    fn test_custom_error_message() {
        let (aliases, modules) = tables();
        let snapshot = AuthSnapshot::with_permissions([] as [&str; 0]);
        let eval = AccessEvaluator::new(&snapshot, &aliases, &modules);

        let decision = ModuleGate::new("security")
            .with_error()
            .with_error_message("Security dashboard is restricted")
            .evaluate(&eval);

        assert_eq!(decision.render, GateRender::DeniedNotice("Security dashboard is restricted".to_string()));
    }

    #[test]
    fn test_operation_gate() {
        let (aliases, modules) = tables();
        let snapshot = AuthSnapshot::with_permissions(["VIEW_PROJECTS"]);
        let eval = AccessEvaluator::new(&snapshot, &aliases, &modules);

        let view = ModuleGate::new("projects").evaluate(&eval);
        assert_eq!(view.state, GateState::Allowed);

        let edit = ModuleGate::new("project").with_operation("edit").evaluate(&eval);
        assert_eq!(edit.state, GateState::Denied);
    }

    #[test]
    fn test_permission_gate_quantifiers() {
        let (aliases, modules) = tables();
        let snapshot = AuthSnapshot::with_permissions(["VIEW_PROJECTS"]);
        let eval = AccessEvaluator::new(&snapshot, &aliases, &modules);

        assert_eq!(PermissionGate::new("VIEW_PROJECTS").evaluate(&eval).state, GateState::Allowed);
        assert_eq!(PermissionGate::any_of(["VIEW_PROJECTS", "VIEW_USERS"]).evaluate(&eval).state, GateState::Allowed);
        assert_eq!(PermissionGate::all_of(["VIEW_PROJECTS", "VIEW_USERS"]).evaluate(&eval).state, GateState::Denied);
    }

    #[test]
    fn test_revocation_takes_effect_on_next_evaluation() {
        let (aliases, modules) = tables();
        let gate = PermissionGate::new("VIEW_PROJECTS");

        let granted = AuthSnapshot::with_permissions(["VIEW_PROJECTS"]);
        let eval = AccessEvaluator::new(&granted, &aliases, &modules);
        assert_eq!(gate.evaluate(&eval).state, GateState::Allowed);

        let revoked = AuthSnapshot::with_permissions([] as [&str; 0]);
        let eval = AccessEvaluator::new(&revoked, &aliases, &modules);
        assert_eq!(gate.evaluate(&eval).state, GateState::Denied);
    }
}
