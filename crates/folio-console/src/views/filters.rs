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

//! Data-driven filter panel
//!
//! One input per active filter slot. Slots are bounded by the number of
//! declared filter keys, and the panel never drops to zero slots while
//! keys exist: removing the last slot restores the default one. Switching
//! a slot to another key clears its prior value so a stale value of the
//! wrong shape is never submitted.

use crate::access::evaluator::FilterAccess;
use crate::catalog::transport::FilterValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Input kind of a filter field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterKind {
    Text,
    MultiSelect,
}

impl FilterKind {
    fn empty_value(self) -> FilterValue {
        match self {
            FilterKind::Text => FilterValue::Text(String::new()),
            FilterKind::MultiSelect => FilterValue::Selection(Vec::new()),
        }
    }
}

/// Declaration of one available filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub key: String,
    pub label: String,
    pub kind: FilterKind,

    /// Choices for multi-select filters
    pub options: Vec<String>,
}

impl FilterConfig {
    /// A free-text filter
    pub fn text<K: Into<String>, L: Into<String>>(key: K, label: L) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: FilterKind::Text,
            options: Vec::new(),
        }
    }

    /// A multi-select filter over the given options
    pub fn multiselect<K: Into<String>, L: Into<String>>(key: K, label: L, options: Vec<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: FilterKind::MultiSelect,
            options,
        }
    }
}

/// One active filter input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSlot {
    pub key: String,
    pub value: FilterValue,
}

/// The filter panel of one index page
#[derive(Debug, Clone)]
pub struct FilterPanel {
    configs: Vec<FilterConfig>,
    slots: Vec<FilterSlot>,
}

impl FilterPanel {
    /// Create a panel over the declared filters, starting with one
    /// default slot keyed by the first declaration
    pub fn new(configs: Vec<FilterConfig>) -> Self {
        let mut panel = Self { configs, slots: Vec::new() };
        panel.restore_default_slot();
        panel
    }

    /// Declared filters, in declaration order
    pub fn configs(&self) -> &[FilterConfig] {
        &self.configs
    }

    /// Active slots, in display order
    pub fn slots(&self) -> &[FilterSlot] {
        &self.slots
    }

    /// Keys of the active slots
    pub fn active_keys(&self) -> Vec<String> {
        self.slots.iter().map(|slot| slot.key.clone()).collect()
    }

    fn config_for(&self, key: &str) -> Option<&FilterConfig> {
        self.configs.iter().find(|config| config.key == key)
    }

    fn restore_default_slot(&mut self) {
        if self.slots.is_empty() {
            if let Some(first) = self.configs.first() {
                self.slots.push(FilterSlot {
                    key: first.key.clone(),
                    value: first.kind.empty_value(),
                });
            }
        }
    }

    /// Whether another slot can be added
    pub fn can_add(&self) -> bool {
        self.slots.len() < self.configs.len()
    }

    /// Add a slot for the first unused filter key. No-op when every
    /// declared key is already active.
    pub fn add_slot(&mut self) -> bool {
        if !self.can_add() {
            return false;
        }

        let Some(config) = self.configs.iter().find(|config| !self.slots.iter().any(|slot| slot.key == config.key)) else {
            return false;
        };

        self.slots.push(FilterSlot {
            key: config.key.clone(),
            value: config.kind.empty_value(),
        });
        true
    }

    /// Remove a slot. Removing the last slot restores the default one.
    pub fn remove_slot(&mut self, index: usize) {
        if index < self.slots.len() {
            self.slots.remove(index);
            self.restore_default_slot();
        }
    }

    /// Switch a slot to another filter key, clearing its value.
    ///
    /// Rejected when the key is undeclared or already active elsewhere.
    pub fn set_slot_key(&mut self, index: usize, key: &str) -> bool {
        if index >= self.slots.len() || self.slots[index].key == key {
            return false;
        }

        if self.slots.iter().enumerate().any(|(i, slot)| i != index && slot.key == key) {
            return false;
        }

        let Some((key, kind)) = self.config_for(key).map(|config| (config.key.clone(), config.kind)) else {
            return false;
        };

        self.slots[index] = FilterSlot {
            key,
            value: kind.empty_value(),
        };
        true
    }

    /// Set a slot's value
    pub fn set_slot_value(&mut self, index: usize, value: FilterValue) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.value = value;
        }
    }

    /// Reset to exactly one default slot
    pub fn clear(&mut self) {
        self.slots.clear();
        self.restore_default_slot();
    }

    /// The clean filter object: empty strings and empty selections are
    /// pruned, so zero active or all-empty slots yield an empty map
    pub fn clean(&self) -> BTreeMap<String, FilterValue> {
        self.slots
            .iter()
            .filter(|slot| !slot.value.is_empty())
            .map(|slot| (slot.key.clone(), slot.value.clone()))
            .collect()
    }

    /// Whether the search action is enabled. Disabled only when every
    /// active slot is denied: users may still search with no filters.
    pub fn search_enabled(&self, access: &BTreeMap<String, FilterAccess>) -> bool {
        if self.slots.is_empty() {
            return true;
        }

        self.slots.iter().any(|slot| access.get(&slot.key).map(|a| !a.denied).unwrap_or(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> FilterPanel {
        FilterPanel::new(vec![
            FilterConfig::text("code", "Code"),
            FilterConfig::text("name", "Name"),
            FilterConfig::multiselect("categories", "Categories", vec!["web".to_string(), "ml".to_string()]),
        ])
    }

    #[test]
    fn test_starts_with_one_default_slot() {
        let panel = panel();

        assert_eq!(panel.slots().len(), 1);
        assert_eq!(panel.slots()[0].key, "code");
        assert_eq!(panel.slots()[0].value, FilterValue::Text(String::new()));
    }

    #[test]
    fn test_add_is_bounded_by_declared_keys() {
        let mut panel = FilterPanel::new(vec![FilterConfig::text("code", "Code"), FilterConfig::text("name", "Name")]);

        assert!(panel.add_slot());
        assert_eq!(panel.active_keys(), vec!["code", "name"]);

        // both declared keys active: add is a no-op
        assert!(!panel.can_add());
        assert!(!panel.add_slot());
        assert_eq!(panel.slots().len(), 2);
    }

    #[test]
    fn test_removing_last_slot_restores_default() {
        let mut panel = panel();
        panel.set_slot_value(0, FilterValue::Text("query".to_string()));

        panel.remove_slot(0);

        assert_eq!(panel.slots().len(), 1);
        assert_eq!(panel.slots()[0].key, "code");
        assert!(panel.slots()[0].value.is_empty());
    }

    #[test]
    fn test_switching_key_clears_stale_value() {
        let mut panel = panel();
        panel.set_slot_value(0, FilterValue::Text("old text".to_string()));

        assert!(panel.set_slot_key(0, "categories"));

        assert_eq!(panel.slots()[0].key, "categories");
        assert_eq!(panel.slots()[0].value, FilterValue::Selection(Vec::new()));
    }

    #[test]
    fn test_switching_to_active_key_is_rejected() {
        let mut panel = panel();
        panel.add_slot();

        assert!(!panel.set_slot_key(1, "code"));
        assert!(!panel.set_slot_key(0, "unknown"));
    }

    #[test]
    fn test_clean_prunes_empty_values() {
        let mut panel = panel();
        assert!(panel.clean().is_empty());

        panel.set_slot_value(0, FilterValue::Text("search".to_string()));
        panel.add_slot();

        let clean = panel.clean();
        assert_eq!(clean.len(), 1);
        assert_eq!(clean["code"], FilterValue::Text("search".to_string()));
    }

    #[test]
    fn test_clear_resets_to_single_default_slot() {
        let mut panel = panel();
        panel.set_slot_value(0, FilterValue::Text("query".to_string()));
        panel.add_slot();
        panel.add_slot();

        panel.clear();

        assert_eq!(panel.slots().len(), 1);
        assert_eq!(panel.slots()[0].key, "code");
        assert!(panel.clean().is_empty());
    }

    #[test]
    fn test_search_disabled_only_when_all_active_denied() {
        let mut panel = panel();
        panel.add_slot();

        let mut access = BTreeMap::new();
        access.insert(
            "code".to_string(),
            FilterAccess {
                denied: true,
                message: Some("restricted".to_string()),
            },
        );
        access.insert(
            "name".to_string(),
            FilterAccess {
                denied: true,
                message: Some("restricted".to_string()),
            },
        );

        assert!(!panel.search_enabled(&access));

        // one allowed slot re-enables search
        assert!(panel.set_slot_key(1, "categories"));
        assert!(panel.search_enabled(&access));
    }
}
