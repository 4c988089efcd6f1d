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

//! Manage-alias expansion table
//!
//! A "manage" permission implicitly grants every permission in its
//! expansion list, and only those. The table is plain data so it can be
//! extended and tested without touching evaluator logic.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Table of manage alias → granted permission names
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManageAliasTable {
    table: HashMap<String, Vec<String>>,
}

impl ManageAliasTable {
    /// Create an empty table
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add an alias with its expansion list
    pub fn with_alias<S: Into<String>>(mut self, alias: S, grants: &[&str]) -> Self {
        self.table.insert(alias.into(), grants.iter().map(|g| g.to_string()).collect());
        self
    }

    /// The expansion list of an alias, if registered
    pub fn expansion(&self, alias: &str) -> Option<&[String]> {
        self.table.get(alias).map(Vec::as_slice)
    }

    /// Whether a held alias expands to the wanted permission
    pub fn grants(&self, held: &str, wanted: &str) -> bool {
        self.table.get(held).is_some_and(|grants| grants.iter().any(|g| g == wanted))
    }

    /// Registered alias names
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    /// Default table for the catalog modules
    pub fn default_catalog() -> Self {
        Self::empty()
            .with_alias("MANAGE_PROJECTS", &["VIEW_PROJECTS", "CREATE_PROJECT", "EDIT_PROJECT", "DELETE_PROJECT"])
            .with_alias("MANAGE_PORTFOLIOS", &["VIEW_PORTFOLIOS", "CREATE_PORTFOLIO", "EDIT_PORTFOLIO", "DELETE_PORTFOLIO"])
            .with_alias("MANAGE_CATEGORIES", &["VIEW_CATEGORIES", "CREATE_CATEGORY", "EDIT_CATEGORY", "DELETE_CATEGORY"])
            .with_alias(
                "MANAGE_CATEGORY_TYPES",
                &["VIEW_CATEGORY_TYPES", "CREATE_CATEGORY_TYPE", "EDIT_CATEGORY_TYPE", "DELETE_CATEGORY_TYPE"],
            )
            .with_alias("MANAGE_SKILLS", &["VIEW_SKILLS", "CREATE_SKILL", "EDIT_SKILL", "DELETE_SKILL"])
            .with_alias("MANAGE_SECTIONS", &["VIEW_SECTIONS", "CREATE_SECTION", "EDIT_SECTION", "DELETE_SECTION"])
            .with_alias("MANAGE_IMAGES", &["VIEW_IMAGES", "UPLOAD_IMAGE", "DELETE_IMAGE"])
            .with_alias("MANAGE_ATTACHMENTS", &["VIEW_ATTACHMENTS", "UPLOAD_ATTACHMENT", "DELETE_ATTACHMENT"])
            .with_alias("MANAGE_USERS", &["VIEW_USERS", "CREATE_USER", "EDIT_USER", "DELETE_USER"])
            .with_alias("MANAGE_ROLES", &["VIEW_ROLES", "CREATE_ROLE", "EDIT_ROLE", "DELETE_ROLE"])
            .with_alias("MANAGE_SECURITY", &["VIEW_SECURITY"])
    }
}
