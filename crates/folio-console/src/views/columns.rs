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

//! Grid column declarations and visibility
//!
//! Column definitions are static; the visible set is the base set
//! intersected with the allowed bucket. When any column is denied the
//! actions column is hidden entirely rather than rendered with some
//! buttons missing, so the grid never implies partial capability.

use crate::access::evaluator::ColumnAccess;
use serde::{Deserialize, Serialize};

/// Column id of the edit/delete actions column
pub const ACTIONS_COLUMN: &str = "actions";

/// Static declaration of one grid column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub id: String,
    pub label: String,
    pub sortable: bool,
}

impl ColumnDef {
    /// A sortable data column
    pub fn new<I: Into<String>, L: Into<String>>(id: I, label: L) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            sortable: true,
        }
    }

    /// Mark the column unsortable
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// The edit/delete actions column
    pub fn actions() -> Self {
        Self::new(ACTIONS_COLUMN, "Actions").unsortable()
    }
}

/// The static column set of one entity grid
#[derive(Debug, Clone)]
pub struct GridView {
    columns: Vec<ColumnDef>,
}

impl GridView {
    /// Declare the base columns, in display order
    pub fn new(columns: Vec<ColumnDef>) -> Self {
        Self { columns }
    }

    /// All declared columns
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Columns to render for the given access buckets
    pub fn visible_columns(&self, access: &ColumnAccess) -> Vec<&ColumnDef> {
        self.columns
            .iter()
            .filter(|column| {
                if column.id == ACTIONS_COLUMN && access.any_denied() {
                    return false;
                }
                access.is_allowed(&column.id)
            })
            .collect()
    }

    /// Labels for the denial notice: every denied column, plus the
    /// actions column when it was hidden by the any-denied rule
    pub fn denied_labels(&self, access: &ColumnAccess) -> Vec<String> {
        self.columns
            .iter()
            .filter(|column| {
                access.denied.contains(&column.id) || (column.id == ACTIONS_COLUMN && access.any_denied())
            })
            .map(|column| column.label.clone())
            .collect()
    }
}
