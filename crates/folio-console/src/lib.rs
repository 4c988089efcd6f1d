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

//! Folio Console core
//!
//! This crate provides the non-visual core of the Folio administrative
//! console: the permission store fed by the backend session, the access
//! evaluator and gates that decide what each user sees, and the
//! list/filter/form composition plus per-entity data providers the index
//! pages are assembled from. The REST backend remains the authority on
//! authorization; everything here is display gating.

pub mod access;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod session;
pub mod views;
