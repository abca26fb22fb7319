// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool client trait: the boundary to the external data producers.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::DashwireError;
use crate::response::WidgetDataResponse;

/// Invokes a named tool on a data source and returns its raw response.
///
/// Implementations own transport, authentication, and their own timeouts.
/// The engine treats `Err(_)` and a response with `success: false` the same
/// way: as a fetch failure for the calling widget.
#[async_trait]
pub trait ToolClient: Send + Sync + 'static {
    async fn invoke(
        &self,
        data_source: &str,
        tool: &str,
        args: Option<&Value>,
    ) -> Result<WidgetDataResponse, DashwireError>;
}
