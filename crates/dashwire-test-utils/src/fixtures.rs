// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config builders for tests. These panic on invalid input.

use serde_json::{Value, json};

use dashwire_core::{DashboardConfig, Viewer, WidgetConfig, WidgetPermissions};

/// A widget of any type reading `tool` on the `shop` data source.
pub fn widget(id: &str, widget_type: &str, tool: &str, mapping: Value) -> WidgetConfig {
    widget_from_json(json!({
        "id": id,
        "name": id,
        "type": widget_type,
        "dataSource": "shop",
        "tool": tool,
        "mapping": mapping,
        "published": true,
    }))
}

/// A stats card showing `$.total` with a `{{label}}` subtitle.
pub fn stats_card(id: &str, tool: &str) -> WidgetConfig {
    widget(
        id,
        "stats-card",
        tool,
        json!({"value": "$.total", "subtitle": "{{label}}"}),
    )
}

pub fn widget_from_json(value: Value) -> WidgetConfig {
    serde_json::from_value(value).expect("fixture widget config must be valid")
}

/// Enable periodic refresh (and optionally focus refresh) on a widget.
pub fn with_refresh(mut config: WidgetConfig, interval: &str, on_focus: bool) -> WidgetConfig {
    config.refresh = Some(
        serde_json::from_value(json!({
            "enabled": true,
            "interval": interval,
            "onFocus": on_focus,
        }))
        .expect("fixture refresh must be valid"),
    );
    config
}

pub fn with_permissions(mut config: WidgetConfig, permissions: WidgetPermissions) -> WidgetConfig {
    config.permissions = Some(permissions);
    config
}

pub fn dashboard(id: &str, widgets: &[&str]) -> DashboardConfig {
    serde_json::from_value(json!({
        "id": id,
        "name": id,
        "widgets": widgets,
        "published": true,
    }))
    .expect("fixture dashboard must be valid")
}

pub fn viewer(id: &str, roles: &[&str]) -> Viewer {
    Viewer::new(id, roles)
}

/// Payload matching [`stats_card`].
pub fn stats_data(total: i64, label: &str) -> Value {
    json!({"total": total, "label": label})
}
