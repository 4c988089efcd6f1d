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

//! Module registry
//!
//! Maps each functional area of the console to the permissions that grant
//! access to it. A module with no registered permission list is always
//! denied: new modules must opt in, not fall open.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Registry of module key → permissions granting any access
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleRegistry {
    modules: HashMap<String, Vec<String>>,
}

impl ModuleRegistry {
    /// Create an empty registry
    pub fn empty() -> Self {
        Self::default()
    }

    /// Register a module with its access-granting permissions
    pub fn with_module<S: Into<String>>(mut self, key: S, permissions: &[&str]) -> Self {
        self.modules.insert(key.into(), permissions.iter().map(|p| p.to_string()).collect());
        self
    }

    /// Permissions granting access to a module, if registered
    pub fn permissions_for(&self, module_key: &str) -> Option<&[String]> {
        self.modules.get(module_key).map(Vec::as_slice)
    }

    /// Registered module keys
    pub fn module_keys(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    /// Default registry for the catalog console
    pub fn default_catalog() -> Self {
        Self::empty()
            .with_module("projects", &["VIEW_PROJECTS", "MANAGE_PROJECTS"])
            .with_module("portfolios", &["VIEW_PORTFOLIOS", "MANAGE_PORTFOLIOS"])
            .with_module("categories", &["VIEW_CATEGORIES", "MANAGE_CATEGORIES"])
            .with_module("categorytypes", &["VIEW_CATEGORY_TYPES", "MANAGE_CATEGORY_TYPES"])
            .with_module("skills", &["VIEW_SKILLS", "MANAGE_SKILLS"])
            .with_module("sections", &["VIEW_SECTIONS", "MANAGE_SECTIONS"])
            .with_module("images", &["VIEW_IMAGES", "MANAGE_IMAGES"])
            .with_module("attachments", &["VIEW_ATTACHMENTS", "MANAGE_ATTACHMENTS"])
            .with_module("users", &["VIEW_USERS", "MANAGE_USERS"])
            .with_module("roles", &["VIEW_ROLES", "MANAGE_ROLES"])
            .with_module("security", &["VIEW_SECURITY", "MANAGE_SECURITY"])
    }
}
