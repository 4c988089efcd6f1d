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

//! List/filter/form composition
//!
//! The building blocks of an entity index page: grid columns pruned by
//! the access evaluator, a single-column sort model, a data-driven filter
//! panel, the mode-keyed modal form, and the page object wiring them to a
//! data provider.

pub mod columns;
pub mod filters;
pub mod form;
pub mod page;
pub mod sort;

pub use columns::*;
pub use filters::*;
pub use form::*;
pub use page::*;
pub use sort::*;
