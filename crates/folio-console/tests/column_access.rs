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

//! Property tests for grid column access

use folio_console::access::{AccessEvaluator, AccessRequirement, AuthSnapshot, ColumnAccessMap, ManageAliasTable, ModuleRegistry};
use folio_console::views::{ACTIONS_COLUMN, ColumnDef, GridView};
use proptest::prelude::*;
use std::collections::BTreeMap;

const PERMISSION_POOL: &[&str] = &["VIEW_PROJECTS", "MANAGE_PROJECTS", "VIEW_USERS", "MANAGE_USERS", "VIEW_SKILLS", "VIEW_SECURITY"];

const COLUMN_POOL: &[&str] = &["code", "name", "owner", "skills", "security_level", ACTIONS_COLUMN];

fn arb_held_permissions() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(PERMISSION_POOL), 0..4).prop_map(|held| held.into_iter().map(String::from).collect())
}

/// Deduplicated (column, requirement) entries, so permuting them yields
/// the same map
fn arb_column_entries() -> impl Strategy<Value = Vec<(String, AccessRequirement)>> {
    prop::collection::vec(
        (prop::sample::select(COLUMN_POOL), prop::collection::vec(prop::sample::select(PERMISSION_POOL), 1..3)),
        0..6,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .map(|(column, permissions)| {
                (
                    column.to_string(),
                    AccessRequirement::column(permissions.into_iter().map(String::from), "projects"),
                )
            })
            .collect::<BTreeMap<_, _>>()
            .into_iter()
            .collect()
    })
}

proptest! {
    #[test]
    fn buckets_are_order_independent_and_idempotent(held in arb_held_permissions(), entries in arb_column_entries()) {
        let aliases = ManageAliasTable::default_catalog();
        let modules = ModuleRegistry::default_catalog();
        let snapshot = AuthSnapshot::with_permissions(held);
        let eval = AccessEvaluator::new(&snapshot, &aliases, &modules);

        let forward: ColumnAccessMap = entries.iter().cloned().collect();
        let reversed: ColumnAccessMap = entries.iter().rev().cloned().collect();

        let first = eval.grid_column_access(&forward);
        let permuted = eval.grid_column_access(&reversed);
        let again = eval.grid_column_access(&forward);

        prop_assert_eq!(&first, &permuted);
        prop_assert_eq!(&first, &again);
    }

    #[test]
    fn buckets_partition_the_mapped_columns(held in arb_held_permissions(), entries in arb_column_entries()) {
        let aliases = ManageAliasTable::default_catalog();
        let modules = ModuleRegistry::default_catalog();
        let snapshot = AuthSnapshot::with_permissions(held);
        let eval = AccessEvaluator::new(&snapshot, &aliases, &modules);

        let map: ColumnAccessMap = entries.iter().cloned().collect();
        let access = eval.grid_column_access(&map);

        for (column, _) in &map {
            prop_assert!(access.allowed.contains(column) != access.denied.contains(column));
        }
        prop_assert_eq!(access.allowed.len() + access.denied.len(), map.len());
    }

    #[test]
    fn any_denied_column_always_hides_actions(held in arb_held_permissions(), entries in arb_column_entries()) {
        let aliases = ManageAliasTable::default_catalog();
        let modules = ModuleRegistry::default_catalog();
        let snapshot = AuthSnapshot::with_permissions(held);
        let eval = AccessEvaluator::new(&snapshot, &aliases, &modules);

        let map: ColumnAccessMap = entries.iter().cloned().collect();
        let access = eval.grid_column_access(&map);

        let grid = GridView::new(COLUMN_POOL.iter().map(|id| ColumnDef::new(*id, id.to_uppercase())).collect());
        let visible = grid.visible_columns(&access);

        if access.any_denied() {
            prop_assert!(visible.iter().all(|column| column.id != ACTIONS_COLUMN));
        }
    }
}
