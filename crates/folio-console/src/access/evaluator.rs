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

//! Access evaluation
//!
//! Pure functions over one authentication snapshot. Callers must handle
//! the loading state before evaluating: a snapshot with `loading = true`
//! answers nothing meaningfully, and gates render a neutral state for it.

use crate::access::aliases::ManageAliasTable;
use crate::access::modules::ModuleRegistry;
use crate::access::requirement::{AccessRequirement, AccessVerdict, filter_denial_message};
use crate::access::store::AuthSnapshot;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Column id → access requirement. Columns absent from the map are
/// implicitly allowed; sensitive columns must always be mapped.
pub type ColumnAccessMap = HashMap<String, AccessRequirement>;

/// Allowed/denied buckets for the mapped grid columns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnAccess {
    pub allowed: BTreeSet<String>,
    pub denied: BTreeSet<String>,
}

impl ColumnAccess {
    /// Whether a column may be shown. Unmapped columns are allowed.
    pub fn is_allowed(&self, column_id: &str) -> bool {
        !self.denied.contains(column_id)
    }

    /// Whether any mapped column was denied
    pub fn any_denied(&self) -> bool {
        !self.denied.is_empty()
    }
}

/// Access state of one filter field. Denied filters stay visible but
/// disabled, so users know the filter exists and is restricted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterAccess {
    pub denied: bool,
    pub message: Option<String>,
}

impl FilterAccess {
    fn allowed() -> Self {
        Self { denied: false, message: None }
    }

    fn denied(module: &str) -> Self {
        Self {
            denied: true,
            message: Some(filter_denial_message(module)),
        }
    }
}

/// Evaluates access requirements against one snapshot
pub struct AccessEvaluator<'a> {
    snapshot: &'a AuthSnapshot,
    aliases: &'a ManageAliasTable,
    modules: &'a ModuleRegistry,
}

impl<'a> AccessEvaluator<'a> {
    /// Create an evaluator over a snapshot and the access tables
    pub fn new(snapshot: &'a AuthSnapshot, aliases: &'a ManageAliasTable, modules: &'a ModuleRegistry) -> Self {
        Self { snapshot, aliases, modules }
    }

    /// The snapshot under evaluation
    pub fn snapshot(&self) -> &AuthSnapshot {
        self.snapshot
    }

    /// Whether the user holds a permission, directly or through a manage
    /// alias. Always false when logged out, without diagnostics: the
    /// logged-out case is routine, not noteworthy.
    pub fn has_permission(&self, name: &str) -> bool {
        if !self.snapshot.authenticated {
            return false;
        }

        if self.snapshot.system_admin {
            return true;
        }

        if self.snapshot.permissions.contains(name) {
            return true;
        }

        self.snapshot.permissions.iter().any(|held| self.aliases.grants(held, name))
    }

    /// Whether the user holds any of the listed permissions
    pub fn has_any_permission<I, S>(&self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.snapshot.authenticated && self.snapshot.system_admin {
            return true;
        }

        names.into_iter().any(|name| self.has_permission(name.as_ref()))
    }

    /// Whether the user holds every listed permission
    pub fn has_all_permissions<I, S>(&self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.snapshot.authenticated && self.snapshot.system_admin {
            return true;
        }

        names.into_iter().all(|name| self.has_permission(name.as_ref()))
    }

    /// Whether the user may access a module at all.
    ///
    /// A module with no registered permission list is always denied.
    pub fn can_access_module(&self, module_key: &str) -> bool {
        match self.modules.permissions_for(module_key) {
            Some(permissions) => self.has_any_permission(permissions),
            None => false,
        }
    }

    /// Whether the user may perform an operation within a module.
    ///
    /// The permission name is `OPERATION_MODULE`, uppercased, e.g.
    /// `("edit", "project")` → `EDIT_PROJECT`.
    pub fn can_perform_operation(&self, operation: &str, module: &str) -> bool {
        let name = format!("{}_{}", operation, module).to_uppercase();
        self.has_permission(&name)
    }

    /// Evaluate a declarative requirement to a verdict
    pub fn evaluate(&self, requirement: &AccessRequirement) -> AccessVerdict {
        match requirement {
            AccessRequirement::Permission(name) => {
                if self.has_permission(name) {
                    AccessVerdict::Allowed
                } else {
                    AccessVerdict::denied()
                }
            }

            AccessRequirement::AnyOf(names) => {
                if self.has_any_permission(names) {
                    AccessVerdict::Allowed
                } else {
                    AccessVerdict::denied()
                }
            }

            AccessRequirement::AllOf(names) => {
                if self.has_all_permissions(names) {
                    AccessVerdict::Allowed
                } else {
                    AccessVerdict::denied()
                }
            }

            AccessRequirement::Column { permissions, module } => {
                if self.has_any_permission(permissions) {
                    AccessVerdict::Allowed
                } else {
                    AccessVerdict::denied_for_module(module)
                }
            }
        }
    }

    /// Bucket the mapped grid columns into allowed and denied sets.
    ///
    /// Idempotent and independent of map iteration order. Columns not in
    /// the map never appear in either bucket and are treated as allowed
    /// by [`ColumnAccess::is_allowed`].
    pub fn grid_column_access(&self, map: &ColumnAccessMap) -> ColumnAccess {
        let mut access = ColumnAccess::default();

        for (column_id, requirement) in map {
            if self.evaluate(requirement).is_allowed() {
                access.allowed.insert(column_id.clone());
            } else {
                access.denied.insert(column_id.clone());
            }
        }

        access
    }

    /// Evaluate filter fields against their requirements.
    ///
    /// Keys without a requirement are allowed. Denied entries carry a
    /// message naming the restricted module.
    pub fn filter_access(&self, filter_keys: &[String], requirements: &HashMap<String, AccessRequirement>) -> BTreeMap<String, FilterAccess> {
        filter_keys
            .iter()
            .map(|key| {
                let access = match requirements.get(key) {
                    Some(requirement) => match self.evaluate(requirement) {
                        AccessVerdict::Allowed => FilterAccess::allowed(),
                        AccessVerdict::Denied { .. } => {
                            let module = match requirement {
                                AccessRequirement::Column { module, .. } => module.as_str(),
                                _ => key.as_str(),
                            };
                            FilterAccess::denied(module)
                        }
                    },
                    None => FilterAccess::allowed(),
                };

                (key.clone(), access)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::requirement::GENERIC_DENIAL;

    fn tables() -> (ManageAliasTable, ModuleRegistry) {
        (ManageAliasTable::default_catalog(), ModuleRegistry::default_catalog())
    }

    fn evaluator<'a>(snapshot: &'a AuthSnapshot, aliases: &'a ManageAliasTable, modules: &'a ModuleRegistry) -> AccessEvaluator<'a> {
        AccessEvaluator::new(snapshot, aliases, modules)
    }

    #[test]
    fn test_direct_permission() {
        let (aliases, modules) = tables();
        let snapshot = AuthSnapshot::with_permissions(["EDIT_PROJECT"]);
        let eval = evaluator(&snapshot, &aliases, &modules);

        assert!(eval.has_permission("EDIT_PROJECT"));
        assert!(!eval.has_permission("DELETE_PROJECT"));
    }

    #[test]
    fn test_manage_alias_implies_expansion_only() {
        let (aliases, modules) = tables();
        let snapshot = AuthSnapshot::with_permissions(["MANAGE_PROJECTS"]);
        let eval = evaluator(&snapshot, &aliases, &modules);

        assert!(eval.has_permission("VIEW_PROJECTS"));
        assert!(eval.has_permission("CREATE_PROJECT"));
        assert!(eval.has_permission("EDIT_PROJECT"));
        assert!(eval.has_permission("DELETE_PROJECT"));
        assert!(!eval.has_permission("EDIT_SKILL"));
        assert!(!eval.has_permission("VIEW_USERS"));
    }

    #[test]
    fn test_system_admin_short_circuits_everything() {
        let (aliases, modules) = tables();
        let snapshot = AuthSnapshot::system_admin();
        let eval = evaluator(&snapshot, &aliases, &modules);

        assert!(eval.has_permission("ANYTHING_AT_ALL"));
        assert!(eval.has_any_permission(["X"]));
        assert!(eval.has_all_permissions(["X", "Y", "Z"]));
        assert!(eval.can_access_module("projects"));
        assert!(eval.can_perform_operation("delete", "project"));
    }

    #[test]
    fn test_unauthenticated_denies_everything() {
        let (aliases, modules) = tables();
        let snapshot = AuthSnapshot {
            authenticated: false,
            system_admin: true,
            permissions: ["EDIT_PROJECT".to_string()].into_iter().collect(),
            ..AuthSnapshot::default()
        };
        let eval = evaluator(&snapshot, &aliases, &modules);

        assert!(!eval.has_permission("EDIT_PROJECT"));
        assert!(!eval.has_any_permission(["EDIT_PROJECT"]));
        assert!(!eval.can_access_module("projects"));
    }

    #[test]
    fn test_quantifiers() {
        let (aliases, modules) = tables();
        let snapshot = AuthSnapshot::with_permissions(["VIEW_PROJECTS", "VIEW_SKILLS"]);
        let eval = evaluator(&snapshot, &aliases, &modules);

        assert!(eval.has_any_permission(["VIEW_PROJECTS", "VIEW_USERS"]));
        assert!(!eval.has_any_permission(["VIEW_USERS", "VIEW_ROLES"]));
        assert!(eval.has_all_permissions(["VIEW_PROJECTS", "VIEW_SKILLS"]));
        assert!(!eval.has_all_permissions(["VIEW_PROJECTS", "VIEW_USERS"]));
    }

    #[test]
    fn test_module_access_mirrors_any_quantifier() {
        let (aliases, modules) = tables();
        let snapshot = AuthSnapshot::with_permissions(["VIEW_CATEGORY_TYPES"]);
        let eval = evaluator(&snapshot, &aliases, &modules);

        let listed = modules.permissions_for("categorytypes").unwrap();
        assert_eq!(eval.can_access_module("categorytypes"), eval.has_any_permission(listed));
        assert!(eval.can_access_module("categorytypes"));
        assert!(!eval.can_access_module("users"));
    }

    #[test]
    fn test_unregistered_module_is_denied_even_for_broad_permissions() {
        let (aliases, modules) = tables();
        let snapshot = AuthSnapshot::with_permissions(["VIEW_PROJECTS", "MANAGE_USERS", "MANAGE_ROLES"]);
        let eval = evaluator(&snapshot, &aliases, &modules);

        assert!(!eval.can_access_module("billing"));
    }

    #[test]
    fn test_operation_name_building() {
        let (aliases, modules) = tables();
        let snapshot = AuthSnapshot::with_permissions(["EDIT_PROJECT"]);
        let eval = evaluator(&snapshot, &aliases, &modules);

        assert!(eval.can_perform_operation("edit", "project"));
        assert!(eval.can_perform_operation("EDIT", "PROJECT"));
        assert!(!eval.can_perform_operation("delete", "project"));
    }

    #[test]
    fn test_requirement_evaluation() {
        let (aliases, modules) = tables();
        let snapshot = AuthSnapshot::with_permissions(["VIEW_PROJECTS"]);
        let eval = evaluator(&snapshot, &aliases, &modules);

        assert!(eval.evaluate(&AccessRequirement::permission("VIEW_PROJECTS")).is_allowed());

        let denied = eval.evaluate(&AccessRequirement::permission("VIEW_USERS"));
        assert_eq!(denied.message(), Some(GENERIC_DENIAL));

        let column = eval.evaluate(&AccessRequirement::column(["VIEW_USERS", "MANAGE_USERS"], "users"));
        assert_eq!(column.message(), Some("You don't have permission to view users"));
    }

    #[test]
    fn test_grid_column_buckets() {
        let (aliases, modules) = tables();
        let snapshot = AuthSnapshot::with_permissions(["VIEW_CATEGORY_TYPES"]);
        let eval = evaluator(&snapshot, &aliases, &modules);

        let mut map = ColumnAccessMap::new();
        map.insert("code".to_string(), AccessRequirement::column(["VIEW_CATEGORY_TYPES"], "categorytypes"));
        map.insert("actions".to_string(), AccessRequirement::column(["MANAGE_CATEGORY_TYPES"], "categorytypes"));

        let access = eval.grid_column_access(&map);

        assert!(access.allowed.contains("code"));
        assert!(access.denied.contains("actions"));
        assert!(access.is_allowed("code"));
        assert!(!access.is_allowed("actions"));
        // unmapped columns are implicitly allowed
        assert!(access.is_allowed("name"));
    }

    #[test]
    fn test_grid_column_access_is_idempotent() {
        let (aliases, modules) = tables();
        let snapshot = AuthSnapshot::with_permissions(["VIEW_PROJECTS"]);
        let eval = evaluator(&snapshot, &aliases, &modules);

        let mut map = ColumnAccessMap::new();
        map.insert("code".to_string(), AccessRequirement::column(["VIEW_PROJECTS"], "projects"));
        map.insert("owner".to_string(), AccessRequirement::column(["VIEW_USERS"], "users"));

        let first = eval.grid_column_access(&map);
        let second = eval.grid_column_access(&map);
        assert_eq!(first, second);
    }

    #[test]
    fn test_filter_access_messages() {
        let (aliases, modules) = tables();
        let snapshot = AuthSnapshot::with_permissions(["VIEW_PROJECTS"]);
        let eval = evaluator(&snapshot, &aliases, &modules);

        let keys = vec!["code".to_string(), "category".to_string()];
        let mut requirements = HashMap::new();
        requirements.insert("category".to_string(), AccessRequirement::column(["VIEW_CATEGORIES"], "categories"));

        let access = eval.filter_access(&keys, &requirements);

        assert!(!access["code"].denied);
        assert!(access["category"].denied);
        assert_eq!(access["category"].message.as_deref(), Some("You don't have permission to filter by categories"));
    }
}
