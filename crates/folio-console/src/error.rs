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

//! Error handling for the console core
//!
//! Backend failures carry the backend's own detail message verbatim
//! (RFC 7807 `detail` preferred, generic text as a fallback). Access
//! denials are verdicts, not errors; `PermissionDenied` only appears when
//! an operation is invoked despite a denied verdict.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the console core
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("{detail}")]
    Backend { status: u16, detail: String },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serde JSON error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

/// RFC 7807 Problem Details, as returned by the backend on failure
#[derive(Debug, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type", default)]
    pub problem_type: Option<String>,

    /// A short, human-readable summary of the problem type
    #[serde(default)]
    pub title: Option<String>,

    /// The HTTP status code generated by the origin server
    #[serde(default)]
    pub status: Option<u16>,

    /// A human-readable explanation specific to this occurrence
    #[serde(default)]
    pub detail: Option<String>,
}

impl ConsoleError {
    /// Build a backend error from a response status and body.
    ///
    /// The backend's `detail` text is kept verbatim; bodies that are not
    /// problem-details JSON fall back to a generic message.
    pub fn from_backend_response(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<ProblemDetails>(body)
            .ok()
            .and_then(|p| p.detail.or(p.title))
            .unwrap_or_else(|| format!("Request failed with status {}", status));

        ConsoleError::Backend { status, detail }
    }

    /// Whether this error should be rendered as an inline alert (backend
    /// and validation failures) rather than resolved by a gate.
    pub fn is_inline(&self) -> bool {
        !matches!(self, ConsoleError::Unauthenticated | ConsoleError::PermissionDenied { .. })
    }
}

/// Result type for console operations
pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_detail_is_verbatim() {
        let body = r#"{"type":"about:blank","title":"Conflict","status":409,"detail":"Project code already in use"}"#;
        let err = ConsoleError::from_backend_response(409, body);

        match err {
            ConsoleError::Backend { status, detail } => {
                assert_eq!(status, 409);
                assert_eq!(detail, "Project code already in use");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_backend_fallback_message() {
        let err = ConsoleError::from_backend_response(502, "<html>bad gateway</html>");

        match err {
            ConsoleError::Backend { status, detail } => {
                assert_eq!(status, 502);
                assert_eq!(detail, "Request failed with status 502");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_title_used_when_detail_missing() {
        let err = ConsoleError::from_backend_response(404, r#"{"title":"Not Found","status":404}"#);

        match err {
            ConsoleError::Backend { detail, .. } => assert_eq!(detail, "Not Found"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
