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

//! Entity index page composition
//!
//! Wires one entity's gate, grid, filter panel, sort model and data
//! provider together. Fetches are triggered explicitly: pagination
//! change, sort change, filter search, slot removal, or a form reporting
//! `should_refresh`. Nothing here decides authorization; the page only
//! prunes what is shown and enabled.

use crate::access::audit::{AccessAuditLog, AccessDecision, AccessEvent};
use crate::access::evaluator::{AccessEvaluator, ColumnAccessMap, FilterAccess};
use crate::access::gate::{GateDecision, GateState, ModuleGate};
use crate::access::requirement::AccessRequirement;
use crate::catalog::models::CatalogRecord;
use crate::catalog::provider::EntityProvider;
use crate::catalog::transport::ListParams;
use crate::error::ConsoleResult;
use crate::views::columns::{ColumnDef, GridView};
use crate::views::filters::FilterPanel;
use crate::views::form::FormOutcome;
use crate::views::sort::{SortModel, SortState};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashMap};

/// Render-ready view of an index page for one snapshot
#[derive(Debug, Clone)]
pub struct PageView {
    /// Columns to render, in display order
    pub columns: Vec<ColumnDef>,

    /// Labels of columns withheld from the grid; non-empty means a
    /// denial notice is shown naming them
    pub denied_columns: Vec<String>,

    /// Access state per active filter key
    pub filter_access: BTreeMap<String, FilterAccess>,

    /// Whether the search action is enabled
    pub search_enabled: bool,
}

/// Index page for one entity collection
pub struct IndexPage<T> {
    gate: ModuleGate,
    provider: EntityProvider<T>,
    grid: GridView,
    column_access: ColumnAccessMap,
    filter_requirements: HashMap<String, AccessRequirement>,
    filters: FilterPanel,
    sort: SortState,
    page_size: u32,
}

impl<T> IndexPage<T>
where
    T: CatalogRecord + Serialize + DeserializeOwned + 'static,
{
    /// Assemble an index page
    pub fn new(gate: ModuleGate, provider: EntityProvider<T>, grid: GridView, filters: FilterPanel, default_sort: SortModel) -> Self {
        Self {
            gate,
            provider,
            grid,
            column_access: ColumnAccessMap::new(),
            filter_requirements: HashMap::new(),
            filters,
            sort: SortState::new(default_sort),
            page_size: 20,
        }
    }

    /// Declare access requirements for sensitive columns
    pub fn with_column_access(mut self, column_access: ColumnAccessMap) -> Self {
        self.column_access = column_access;
        self
    }

    /// Declare access requirements for restricted filters
    pub fn with_filter_requirements(mut self, requirements: HashMap<String, AccessRequirement>) -> Self {
        self.filter_requirements = requirements;
        self
    }

    /// Override the page size
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// The page's data provider
    pub fn provider(&self) -> &EntityProvider<T> {
        &self.provider
    }

    /// The filter panel
    pub fn filters(&self) -> &FilterPanel {
        &self.filters
    }

    /// Mutable filter panel for slot edits
    pub fn filters_mut(&mut self) -> &mut FilterPanel {
        &mut self.filters
    }

    /// Evaluate the page gate for a snapshot
    pub fn gate_decision(&self, evaluator: &AccessEvaluator<'_>) -> GateDecision {
        self.gate.evaluate(evaluator)
    }

    /// Evaluate the page gate and record the decision
    pub fn gate_decision_audited(&self, evaluator: &AccessEvaluator<'_>, audit: &AccessAuditLog) -> GateDecision {
        let decision = self.gate_decision(evaluator);

        match decision.state {
            GateState::Allowed => {
                audit.record(AccessEvent::new(AccessDecision::Granted).with_module(self.gate.module()));
            }
            GateState::Denied => {
                let mut event = AccessEvent::new(AccessDecision::Denied).with_module(self.gate.module());
                if let crate::access::gate::GateRender::DeniedNotice(message) = &decision.render {
                    event = event.with_message(message.clone());
                }
                audit.record(event);
            }
            // loading and unauthenticated renders are not access decisions
            GateState::Loading | GateState::Unauthenticated => {}
        }

        decision
    }

    /// Compute the render-ready view for a snapshot
    pub fn view(&self, evaluator: &AccessEvaluator<'_>) -> PageView {
        let column_access = evaluator.grid_column_access(&self.column_access);
        let filter_access = evaluator.filter_access(&self.filters.active_keys(), &self.filter_requirements);

        PageView {
            columns: self.grid.visible_columns(&column_access).into_iter().cloned().collect(),
            denied_columns: self.grid.denied_labels(&column_access),
            search_enabled: self.filters.search_enabled(&filter_access),
            filter_access,
        }
    }

    fn params_for_page(&self, page: u32) -> ListParams {
        let mut params = ListParams {
            page,
            page_size: self.page_size,
            ..ListParams::default()
        };
        self.sort.apply_to(&mut params);
        params.filters = self.filters.clean();
        params
    }

    /// Run a filter search: fetch the first page with the clean filter
    /// object and current sort
    pub async fn search(&self) -> ConsoleResult<()> {
        self.provider.fetch(self.params_for_page(1)).await
    }

    /// Fetch another page, filters and sort preserved
    pub async fn change_page(&self, page: u32) -> ConsoleResult<()> {
        self.provider.fetch(self.params_for_page(page)).await
    }

    /// Apply a sort change and refetch the current page. An empty model
    /// falls back to the default sort.
    pub async fn change_sort(&mut self, sort: Option<SortModel>) -> ConsoleResult<()> {
        self.sort.apply(sort);
        let page = self.provider.page().await;
        self.provider.fetch(self.params_for_page(page)).await
    }

    /// Remove a filter slot and re-run the search with the remaining
    /// filters
    pub async fn remove_filter_slot(&mut self, index: usize) -> ConsoleResult<()> {
        self.filters.remove_slot(index);
        self.search().await
    }

    /// React to a closed dialog form
    pub async fn handle_form_outcome(&self, outcome: FormOutcome) -> ConsoleResult<()> {
        if outcome.should_refresh {
            self.provider.refetch().await?;
        }
        Ok(())
    }
}
