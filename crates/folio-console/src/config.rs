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

//! Configuration for the console core

use std::env;
use std::time::Duration;

/// Configuration for the console core
#[derive(Debug, Clone)]
pub struct Config {
    /// Protocol used to reach the backend (`http` or `https`)
    pub server_protocol: String,

    /// Backend hostname
    pub server_host: String,

    /// Backend port
    pub server_port: u16,

    /// Poll interval for the session flag while authenticated
    pub session_poll_active: Duration,

    /// Poll interval for the session flag while logged out
    pub session_poll_idle: Duration,

    /// Maximum number of retained access-audit events
    pub audit_max_events: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_protocol: "http".to_string(),
            server_host: "127.0.0.1".to_string(),
            server_port: 8000,
            session_poll_active: Duration::from_secs(2),
            session_poll_idle: Duration::from_secs(10),
            audit_max_events: 10_000,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_protocol: env::var("FOLIO_SERVER_PROTOCOL").unwrap_or(defaults.server_protocol),

            server_host: env::var("FOLIO_SERVER_HOST").unwrap_or(defaults.server_host),

            server_port: env::var("FOLIO_SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),

            session_poll_active: env::var("FOLIO_SESSION_POLL_ACTIVE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_poll_active),

            session_poll_idle: env::var("FOLIO_SESSION_POLL_IDLE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_poll_idle),

            audit_max_events: env::var("FOLIO_AUDIT_MAX_EVENTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.audit_max_events),
        }
    }

    /// Base URL of the backend, e.g. `http://127.0.0.1:8000`
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.server_protocol, self.server_host, self.server_port)
    }

    /// Base URL for the REST API, e.g. `http://127.0.0.1:8000/api`
    pub fn api_base_url(&self) -> String {
        format!("{}/api", self.base_url())
    }

    /// Absolute URL for a static asset path returned by the backend.
    ///
    /// Upload endpoints return metadata records whose `*_url` fields are
    /// server-relative; this joins them against the configured base.
    pub fn static_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        format!("{}/{}", self.base_url(), path.trim_start_matches('/'))
    }
}
