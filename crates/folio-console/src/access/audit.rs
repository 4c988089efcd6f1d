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

//! Audit log of access decisions
//!
//! Bounded in-memory record of gate decisions, the data source for the
//! security-monitoring dashboard. Client-side only; the backend keeps its
//! own authoritative audit trail.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Outcome recorded for one access decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessDecision {
    Granted,
    Denied,
}

/// One recorded access decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessEvent {
    /// Unique event ID
    pub id: String,

    /// Event timestamp
    pub timestamp: DateTime<Utc>,

    /// Module the decision concerned, if module-scoped
    pub module: Option<String>,

    /// Permissions the decision was evaluated against
    pub permissions: Vec<String>,

    /// The decision
    pub decision: AccessDecision,

    /// Denial message shown to the user, if any
    pub message: Option<String>,
}

impl AccessEvent {
    /// Create an event for a decision
    pub fn new(decision: AccessDecision) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            module: None,
            permissions: Vec::new(),
            decision,
            message: None,
        }
    }

    /// Set the module the decision concerned
    pub fn with_module<S: Into<String>>(mut self, module: S) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Set the permissions evaluated
    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions = permissions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the user-facing denial message
    pub fn with_message<S: Into<String>>(mut self, message: S) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Aggregate statistics over the retained events
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditStats {
    pub total: usize,
    pub granted: usize,
    pub denied: usize,
    pub denied_by_module: HashMap<String, usize>,
}

/// Bounded in-memory log of access decisions
#[derive(Debug)]
pub struct AccessAuditLog {
    events: RwLock<VecDeque<AccessEvent>>,
    max_events: usize,
}

impl AccessAuditLog {
    /// Create a log retaining up to `max_events` entries
    pub fn new(max_events: usize) -> Self {
        Self {
            events: RwLock::new(VecDeque::new()),
            max_events,
        }
    }

    /// Record a decision, evicting the oldest entry when full
    pub fn record(&self, event: AccessEvent) {
        if event.decision == AccessDecision::Denied {
            debug!(module = ?event.module, "Access denied recorded");
        }

        let mut events = self.events.write();
        if events.len() == self.max_events {
            events.pop_front();
        }
        events.push_back(event);
    }

    /// Most recent events, newest first
    pub fn recent(&self, limit: usize) -> Vec<AccessEvent> {
        self.events.read().iter().rev().take(limit).cloned().collect()
    }

    /// Most recent denials, newest first
    pub fn recent_denials(&self, limit: usize) -> Vec<AccessEvent> {
        self.events
            .read()
            .iter()
            .rev()
            .filter(|event| event.decision == AccessDecision::Denied)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Aggregate statistics over the retained events
    pub fn stats(&self) -> AuditStats {
        let events = self.events.read();
        let mut stats = AuditStats::default();

        for event in events.iter() {
            stats.total += 1;
            match event.decision {
                AccessDecision::Granted => stats.granted += 1,
                AccessDecision::Denied => {
                    stats.denied += 1;
                    if let Some(module) = &event.module {
                        *stats.denied_by_module.entry(module.clone()).or_insert(0) += 1;
                    }
                }
            }
        }

        stats
    }
}

impl Default for AccessAuditLog {
    fn default() -> Self {
        Self::new(10_000)
    }
}
