// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Dashwire widget engine.
//!
//! This crate provides the data model shared by every other crate: widget and
//! dashboard configuration, the tool client response contract, viewer
//! identity, the error type, and the [`ToolClient`] trait through which the
//! engine reaches external data producers.

pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod response;
pub mod traits;
pub mod types;
pub mod widget;

// Re-export key items at crate root for ergonomic imports.
pub use catalog::{CatalogEntry, DisabledWidget, WidgetCatalog};
pub use dashboard::DashboardConfig;
pub use error::DashwireError;
pub use response::{FetchedPayload, WidgetDataResponse};
pub use traits::ToolClient;
pub use types::{RefreshInterval, Viewer, WidgetId, WidgetType, parse_interval};
pub use widget::{
    ChartMapping, ChartType, ClickAction, ColumnType, CustomMapping, ListMapping,
    ProductCardMapping, SearchBoxMapping, SourceKey, StatsCardMapping, TableMapping,
    TextMapping, WidgetChartDataset, WidgetConfig, WidgetMapping, WidgetPermissions,
    WidgetPosition, WidgetRefresh, WidgetTableColumn,
};
