// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Render output boundary: what the UI layer paints for each widget.

use std::collections::BTreeMap;

use dashwire_core::{ChartType, ClickAction};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tagged per-widget result: `ok` with a view, `empty`, or `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RenderOutcome {
    Ok {
        view: WidgetView,
        /// Set when the last fetch failed and `view` shows older data.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
        /// Set when `view` was served from an expired cache entry.
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        stale: bool,
    },
    Empty,
    Error {
        kind: ErrorKind,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// The widget is disabled by a configuration error and is not retried.
    Config,
    /// The last fetch failed and there is no earlier data to show.
    Fetch,
}

impl RenderOutcome {
    pub fn ok(view: WidgetView) -> Self {
        Self::Ok {
            view,
            error: None,
            stale: false,
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Error {
            kind: ErrorKind::Config,
            message: message.into(),
        }
    }

    pub fn fetch_error(message: impl Into<String>) -> Self {
        Self::Error {
            kind: ErrorKind::Fetch,
            message: message.into(),
        }
    }

    /// Attach cache state to an `ok` outcome. Other outcomes are returned as-is.
    pub fn with_cache_state(self, stale: bool, error: Option<String>) -> Self {
        match self {
            Self::Ok { view, .. } => Self::Ok { view, error, stale },
            other => other,
        }
    }

    pub fn view(&self) -> Option<&WidgetView> {
        match self {
            Self::Ok { view, .. } => Some(view),
            _ => None,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

/// A concrete click destination for one rendered element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickTarget {
    pub action: ClickAction,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnHeader {
    pub key: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub sortable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<ClickTarget>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<ClickTarget>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub series_type: ChartType,
    /// The resolved data points in source order, not padded or trimmed to
    /// the labels. `None` where a point is not numeric.
    pub values: Vec<Option<f64>>,
}

/// The visual representation of one widget, with display values resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum WidgetView {
    #[serde(rename_all = "camelCase")]
    StatsCard {
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subtitle: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trend: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<ClickTarget>,
    },
    #[serde(rename_all = "camelCase")]
    Table {
        columns: Vec<ColumnHeader>,
        rows: Vec<TableRow>,
        total_rows: usize,
        truncated: bool,
    },
    #[serde(rename_all = "camelCase")]
    List {
        items: Vec<ListItem>,
        total_items: usize,
        truncated: bool,
    },
    #[serde(rename_all = "camelCase")]
    Chart {
        chart_type: ChartType,
        labels: Vec<String>,
        datasets: Vec<ChartSeries>,
    },
    #[serde(rename_all = "camelCase")]
    SearchBox {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        query_arg: Option<String>,
        results: Vec<ListItem>,
    },
    ProductCard {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        price: Option<String>,
    },
    Text {
        text: String,
    },
    Custom {
        fields: BTreeMap<String, Value>,
    },
    /// Pretty-printed JSON of the whole response payload.
    Raw {
        json: String,
    },
}

impl WidgetView {
    pub fn raw(data: &Value) -> Self {
        let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
        Self::Raw { json }
    }
}
