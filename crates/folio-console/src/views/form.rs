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

//! Modal entity form
//!
//! One form component keyed by mode. Delete mode shows a read-only
//! confirmation summary instead of editable fields. A successful submit
//! reports `should_refresh` so the index page refetches with its current
//! filters and sort preserved.

use crate::catalog::models::{CatalogRecord, validate_language_blocks};
use crate::catalog::provider::EntityProvider;
use crate::error::ConsoleResult;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// What the form does on submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
    Delete,
}

/// Result reported to the index page after a submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormOutcome {
    /// Whether the index page should refetch its current page
    pub should_refresh: bool,
}

/// Modal create/edit/delete form for one record
#[derive(Debug, Clone)]
pub struct EntityForm<T> {
    mode: FormMode,
    record: T,
}

impl<T> EntityForm<T>
where
    T: CatalogRecord + Serialize + DeserializeOwned + 'static,
{
    /// Form creating a new record
    pub fn create(record: T) -> Self {
        Self {
            mode: FormMode::Create,
            record,
        }
    }

    /// Form editing an existing record
    pub fn edit(record: T) -> Self {
        Self { mode: FormMode::Edit, record }
    }

    /// Form confirming deletion of a record
    pub fn delete(record: T) -> Self {
        Self {
            mode: FormMode::Delete,
            record,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// The record under edit
    pub fn record(&self) -> &T {
        &self.record
    }

    /// Mutable access for field edits; meaningless in delete mode
    pub fn record_mut(&mut self) -> &mut T {
        &mut self.record
    }

    /// Whether the fields render read-only
    pub fn is_read_only(&self) -> bool {
        self.mode == FormMode::Delete
    }

    /// Confirmation text shown in delete mode
    pub fn confirmation_summary(&self) -> Option<String> {
        match self.mode {
            FormMode::Delete => Some(format!("Delete \"{}\" ({})?", self.record.display_name(), self.record.code())),
            _ => None,
        }
    }

    /// Validate the record for the current mode without submitting.
    ///
    /// Create and edit require at least one language block with a name;
    /// delete has nothing to validate.
    pub fn validate(&self) -> ConsoleResult<()> {
        match self.mode {
            FormMode::Create | FormMode::Edit => validate_language_blocks(self.record.texts()),
            FormMode::Delete => Ok(()),
        }
    }

    /// Submit to the provider method matching the mode.
    ///
    /// Validation failures return before any network call is issued.
    pub async fn submit(&self, provider: &EntityProvider<T>) -> ConsoleResult<FormOutcome> {
        self.validate()?;

        match self.mode {
            FormMode::Create => {
                provider.create(&self.record).await?;
            }
            FormMode::Edit => {
                provider.update(&self.record).await?;
            }
            FormMode::Delete => {
                provider.delete(self.record.id()).await?;
            }
        }

        Ok(FormOutcome { should_refresh: true })
    }
}
