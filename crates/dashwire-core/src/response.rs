// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The response contract returned by the external tool client.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DashwireError;

/// Result of one tool invocation. Superseded, never mutated, by the next fetch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetDataResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_at: Option<DateTime<Utc>>,
    /// Seconds until the payload should be considered stale. Zero counts as absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_in: Option<u64>,
}

/// The usable part of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPayload {
    pub data: Option<Value>,
    pub cached_at: Option<DateTime<Utc>>,
    pub refresh_in: Option<Duration>,
}

impl WidgetDataResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            ..Self::default()
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_refresh_in(mut self, secs: u64) -> Self {
        self.refresh_in = Some(secs);
        self
    }

    /// Split a response into its payload, treating `success: false` as a fetch error.
    pub fn into_payload(self) -> Result<FetchedPayload, DashwireError> {
        if !self.success {
            let message = self
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| "tool reported failure".to_string());
            return Err(DashwireError::fetch(message));
        }

        Ok(FetchedPayload {
            data: self.data.filter(|d| !d.is_null()),
            cached_at: self.cached_at,
            refresh_in: self
                .refresh_in
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        })
    }
}
