// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Dashwire widget engine.

use thiserror::Error;

/// The primary error type shared by the engine crates and the tool client boundary.
#[derive(Debug, Error)]
pub enum DashwireError {
    /// Configuration errors (malformed refresh interval, empty data source, bad mapping).
    #[error("configuration error: {0}")]
    Config(String),

    /// The tool client call failed or reported `success: false`.
    #[error("fetch error: {message}")]
    Fetch {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No producer is registered for the requested data source and tool.
    #[error("tool not found: {data_source}/{tool}")]
    ToolNotFound { data_source: String, tool: String },

    /// The requested widget is not mounted in the engine.
    #[error("widget not mounted: {0}")]
    UnknownWidget(String),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DashwireError {
    /// Shorthand for a [`DashwireError::Fetch`] without an underlying source.
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true for errors that count as fetch failures at the engine level.
    ///
    /// Timeouts, missing tools, and explicit failures are all treated alike.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::Fetch { .. } | Self::ToolNotFound { .. } | Self::Timeout { .. }
        )
    }
}
