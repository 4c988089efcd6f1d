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

//! Declarative access requirements and verdicts
//!
//! Pages declare what a UI element needs as data; one evaluator turns the
//! declaration into a verdict. This replaces scattered per-page
//! permission conditionals.

use serde::{Deserialize, Serialize};

/// Fallback denial text when no module is named
pub const GENERIC_DENIAL: &str = "You don't have permission to perform this action";

/// What a UI element requires to be shown or enabled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessRequirement {
    /// A single permission name
    Permission(String),

    /// Any one of the listed permissions
    AnyOf(Vec<String>),

    /// Every listed permission
    AllOf(Vec<String>),

    /// A grid column: any of the listed permissions, scoped to a module
    /// for the denial message
    Column { permissions: Vec<String>, module: String },
}

impl AccessRequirement {
    /// Requirement for one permission
    pub fn permission<S: Into<String>>(name: S) -> Self {
        Self::Permission(name.into())
    }

    /// Requirement satisfied by any listed permission
    pub fn any_of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AnyOf(names.into_iter().map(Into::into).collect())
    }

    /// Requirement satisfied only by every listed permission
    pub fn all_of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AllOf(names.into_iter().map(Into::into).collect())
    }

    /// Column requirement with module-scoped denial message
    pub fn column<I, S, M>(permissions: I, module: M) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        M: Into<String>,
    {
        Self::Column {
            permissions: permissions.into_iter().map(Into::into).collect(),
            module: module.into(),
        }
    }
}

/// Outcome of evaluating a requirement against the current snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessVerdict {
    Allowed,
    Denied { message: String },
}

impl AccessVerdict {
    /// Denied verdict with the generic message
    pub fn denied() -> Self {
        Self::Denied {
            message: GENERIC_DENIAL.to_string(),
        }
    }

    /// Denied verdict naming the module the user cannot see
    pub fn denied_for_module(module: &str) -> Self {
        Self::Denied {
            message: module_denial_message(module),
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Denial message, if denied
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Allowed => None,
            Self::Denied { message } => Some(message),
        }
    }
}

/// Module-scoped denial text
pub fn module_denial_message(module: &str) -> String {
    format!("You don't have permission to view {}", module)
}

/// Denial text for a restricted filter field
pub fn filter_denial_message(module: &str) -> String {
    format!("You don't have permission to filter by {}", module)
}
