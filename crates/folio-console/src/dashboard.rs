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

//! Security dashboard summary
//!
//! Condenses the access-audit log into the figures the security
//! monitoring page displays.

use crate::access::audit::{AccessAuditLog, AccessEvent};
use serde::{Deserialize, Serialize};

/// Summary of access activity for the security dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecuritySummary {
    /// Total access decisions retained
    pub total_checks: usize,

    /// Decisions that were denied
    pub denied: usize,

    /// Denials per module, most denied first
    pub denied_by_module: Vec<(String, usize)>,

    /// Most recent denials, newest first
    pub recent_denials: Vec<AccessEvent>,
}

impl SecuritySummary {
    /// How many recent denials the dashboard shows
    const RECENT_LIMIT: usize = 20;

    /// Build a summary from the audit log
    pub fn from_log(log: &AccessAuditLog) -> Self {
        let stats = log.stats();

        let mut denied_by_module: Vec<(String, usize)> = stats.denied_by_module.into_iter().collect();
        denied_by_module.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Self {
            total_checks: stats.total,
            denied: stats.denied,
            denied_by_module,
            recent_denials: log.recent_denials(Self::RECENT_LIMIT),
        }
    }
}
