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

//! Grid sort model
//!
//! Exactly one column and one direction at a time. An empty incoming
//! model falls back to the grid's declared default sort.

use crate::catalog::transport::ListParams;
use serde::{Deserialize, Serialize};

/// One column sorted in one direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortModel {
    pub field: String,
    pub ascending: bool,
}

impl SortModel {
    /// Ascending sort on a field
    pub fn ascending<S: Into<String>>(field: S) -> Self {
        Self {
            field: field.into(),
            ascending: true,
        }
    }

    /// Descending sort on a field
    pub fn descending<S: Into<String>>(field: S) -> Self {
        Self {
            field: field.into(),
            ascending: false,
        }
    }
}

/// Current sort of a grid, with its default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    default: SortModel,
    current: SortModel,
}

impl SortState {
    /// Sort state starting at the default model
    pub fn new(default: SortModel) -> Self {
        Self {
            current: default.clone(),
            default,
        }
    }

    /// The active sort
    pub fn current(&self) -> &SortModel {
        &self.current
    }

    /// Replace the sort; `None` (an emptied sort model) restores the
    /// default
    pub fn apply(&mut self, incoming: Option<SortModel>) {
        self.current = incoming.unwrap_or_else(|| self.default.clone());
    }

    /// Write the active sort into list parameters
    pub fn apply_to(&self, params: &mut ListParams) {
        params.sort_field = Some(self.current.field.clone());
        params.sort_ascending = self.current.ascending;
    }
}
