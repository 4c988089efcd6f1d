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

//! Permission-gated view composition
//!
//! This module decides what the current user sees:
//! - A permission store holding the backend-provided permission snapshot
//! - Manage-alias expansion and the module registry, both plain data
//! - A pure access evaluator producing verdicts from a snapshot
//! - Gate components that turn verdicts into render decisions
//! - An audit log of access decisions feeding the security dashboard
//!
//! The backend enforces authorization on every request; evaluation here
//! only prunes the UI.

pub mod aliases;
pub mod audit;
pub mod evaluator;
pub mod gate;
pub mod modules;
pub mod requirement;
pub mod store;

pub use aliases::*;
pub use audit::*;
pub use evaluator::*;
pub use gate::*;
pub use modules::*;
pub use requirement::*;
pub use store::*;
