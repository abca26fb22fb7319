// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Widget configuration model.
//!
//! [`WidgetConfig`] is the wire contract supplied by the external editor. On
//! the wire, `type` and `mapping` are sibling fields; in memory they are
//! folded into a single [`WidgetMapping`] variant so that every widget type
//! carries exactly the mapping fields it reads. Unknown widget types still
//! load, as [`WidgetMapping::Unrecognized`], and render through the raw view.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DashwireError;
use crate::types::{RefreshInterval, WidgetId, WidgetType};

/// Periodic and focus-driven refresh settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetRefresh {
    pub enabled: bool,
    pub interval: RefreshInterval,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub on_focus: bool,
}

/// Set-valued visibility rule for a widget or dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WidgetPermissions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub public: bool,
}

impl WidgetPermissions {
    /// A rule that admits everyone.
    pub fn public() -> Self {
        Self {
            public: true,
            ..Self::default()
        }
    }

    /// A rule that admits the given roles.
    pub fn roles(roles: &[&str]) -> Self {
        Self {
            roles: roles.iter().map(|r| r.to_string()).collect(),
            ..Self::default()
        }
    }

    /// A rule that admits the given user ids.
    pub fn users(users: &[&str]) -> Self {
        Self {
            users: users.iter().map(|u| u.to_string()).collect(),
            ..Self::default()
        }
    }
}

/// Layout data passed through to the UI untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetPosition {
    pub dashboard: String,
    pub order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Value>,
}

/// What happens when the user activates a widget element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickAction {
    Navigate,
    Modal,
    Tool,
    None,
}

/// How a table cell is formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Number,
    Currency,
    Date,
    Boolean,
    Badge,
}

/// One displayed table column. `key` indexes each row object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetTableColumn {
    pub key: String,
    pub label: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<ColumnType>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub sortable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Line,
    Bar,
    Pie,
    Doughnut,
    Area,
}

/// One chart series; `data_path` points at an array of numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetChartDataset {
    pub label: String,
    pub data_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub series_type: Option<ChartType>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsCardMapping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableMapping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<WidgetTableColumn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMapping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub datasets: Vec<WidgetChartDataset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<ChartType>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMapping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBoxMapping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_arg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_template: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCardMapping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// Text widgets read `itemTemplate` (flat substitution against the data
/// root) and fall back to the `value` path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMapping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_template: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomMapping {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
}

/// Mapping from raw tool output to display values, one variant per widget type.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetMapping {
    StatsCard(StatsCardMapping),
    DataTable(TableMapping),
    Chart(ChartMapping),
    SearchBox(SearchBoxMapping),
    ProductCard(ProductCardMapping),
    List(ListMapping),
    Text(TextMapping),
    Custom(CustomMapping),
    /// A `type` outside the closed set. The mapping is kept verbatim.
    Unrecognized { type_name: String, raw: Value },
}

impl WidgetMapping {
    /// Build the mapping variant for a wire `type` and its `mapping` object.
    ///
    /// A missing or `null` mapping yields the variant's defaults. Fields the
    /// variant does not read are ignored.
    pub fn from_parts(type_name: &str, mapping: Value) -> Result<Self, DashwireError> {
        let Ok(widget_type) = WidgetType::from_str(type_name) else {
            return Ok(Self::Unrecognized {
                type_name: type_name.to_string(),
                raw: mapping,
            });
        };

        let mapping = if mapping.is_null() {
            Value::Object(serde_json::Map::new())
        } else {
            mapping
        };

        let parsed = match widget_type {
            WidgetType::StatsCard => serde_json::from_value(mapping).map(Self::StatsCard),
            WidgetType::DataTable => serde_json::from_value(mapping).map(Self::DataTable),
            WidgetType::Chart => serde_json::from_value(mapping).map(Self::Chart),
            WidgetType::SearchBox => serde_json::from_value(mapping).map(Self::SearchBox),
            WidgetType::ProductCard => serde_json::from_value(mapping).map(Self::ProductCard),
            WidgetType::List => serde_json::from_value(mapping).map(Self::List),
            WidgetType::Text => serde_json::from_value(mapping).map(Self::Text),
            WidgetType::Custom => serde_json::from_value(mapping).map(Self::Custom),
        };

        parsed.map_err(|e| {
            DashwireError::Config(format!("invalid mapping for `{widget_type}` widget: {e}"))
        })
    }

    /// The closed widget type, or `None` for unrecognized types.
    pub fn widget_type(&self) -> Option<WidgetType> {
        Some(match self {
            Self::StatsCard(_) => WidgetType::StatsCard,
            Self::DataTable(_) => WidgetType::DataTable,
            Self::Chart(_) => WidgetType::Chart,
            Self::SearchBox(_) => WidgetType::SearchBox,
            Self::ProductCard(_) => WidgetType::ProductCard,
            Self::List(_) => WidgetType::List,
            Self::Text(_) => WidgetType::Text,
            Self::Custom(_) => WidgetType::Custom,
            Self::Unrecognized { .. } => return None,
        })
    }

    /// The wire `type` string.
    pub fn type_name(&self) -> String {
        match self {
            Self::Unrecognized { type_name, .. } => type_name.clone(),
            other => other
                .widget_type()
                .map(|t| t.to_string())
                .unwrap_or_default(),
        }
    }

    /// The wire `mapping` object.
    pub fn to_value(&self) -> Value {
        let value = match self {
            Self::StatsCard(m) => serde_json::to_value(m),
            Self::DataTable(m) => serde_json::to_value(m),
            Self::Chart(m) => serde_json::to_value(m),
            Self::SearchBox(m) => serde_json::to_value(m),
            Self::ProductCard(m) => serde_json::to_value(m),
            Self::List(m) => serde_json::to_value(m),
            Self::Text(m) => serde_json::to_value(m),
            Self::Custom(m) => serde_json::to_value(m),
            Self::Unrecognized { raw, .. } => return raw.clone(),
        };
        value.unwrap_or(Value::Null)
    }
}

/// The `(dataSource, tool, args)` triple that identifies a widget's data.
///
/// A change to any of the three invalidates the widget's cache and timers.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceKey<'a> {
    pub data_source: &'a str,
    pub tool: &'a str,
    pub args: Option<&'a Value>,
}

/// One configured, independently refreshed unit of dashboard content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWidgetConfig", into = "RawWidgetConfig")]
pub struct WidgetConfig {
    pub id: WidgetId,
    pub name: String,
    pub mapping: WidgetMapping,
    pub data_source: String,
    pub tool: String,
    pub args: Option<Value>,
    pub refresh: Option<WidgetRefresh>,
    pub click_action: Option<ClickAction>,
    pub click_target: Option<String>,
    pub position: Option<WidgetPosition>,
    pub style: Option<Value>,
    pub permissions: Option<WidgetPermissions>,
    pub published: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl WidgetConfig {
    pub fn widget_type(&self) -> Option<WidgetType> {
        self.mapping.widget_type()
    }

    pub fn source_key(&self) -> SourceKey<'_> {
        SourceKey {
            data_source: &self.data_source,
            tool: &self.tool,
            args: self.args.as_ref(),
        }
    }

    /// The periodic refresh period, if refresh is enabled.
    pub fn refresh_period(&self) -> Option<Duration> {
        self.refresh
            .as_ref()
            .filter(|r| r.enabled)
            .map(|r| r.interval.as_duration())
    }

    /// The click action and target template, when the widget is clickable.
    pub fn click(&self) -> Option<(ClickAction, &str)> {
        match (self.click_action, self.click_target.as_deref()) {
            (Some(ClickAction::None), _) | (None, _) | (_, None) => None,
            (Some(action), Some(target)) => Some((action, target)),
        }
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

/// Wire shape of [`WidgetConfig`], with `type` and `mapping` side by side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWidgetConfig {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    widget_type: String,
    data_source: String,
    tool: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    args: Option<Value>,
    #[serde(default)]
    mapping: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh: Option<WidgetRefresh>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    click_action: Option<ClickAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    click_target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    position: Option<WidgetPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    style: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    permissions: Option<WidgetPermissions>,
    #[serde(default)]
    published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<String>,
}

impl TryFrom<RawWidgetConfig> for WidgetConfig {
    type Error = DashwireError;

    fn try_from(raw: RawWidgetConfig) -> Result<Self, Self::Error> {
        if raw.id.trim().is_empty() {
            return Err(DashwireError::Config("widget id must not be empty".into()));
        }
        if raw.data_source.trim().is_empty() {
            return Err(DashwireError::Config(format!(
                "widget `{}`: dataSource must not be empty",
                raw.id
            )));
        }
        if raw.tool.trim().is_empty() {
            return Err(DashwireError::Config(format!(
                "widget `{}`: tool must not be empty",
                raw.id
            )));
        }

        let mapping = WidgetMapping::from_parts(&raw.widget_type, raw.mapping)
            .map_err(|e| DashwireError::Config(format!("widget `{}`: {e}", raw.id)))?;

        Ok(Self {
            id: WidgetId(raw.id),
            name: raw.name,
            mapping,
            data_source: raw.data_source,
            tool: raw.tool,
            args: raw.args,
            refresh: raw.refresh,
            click_action: raw.click_action,
            click_target: raw.click_target,
            position: raw.position,
            style: raw.style,
            permissions: raw.permissions,
            published: raw.published,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        })
    }
}

impl From<WidgetConfig> for RawWidgetConfig {
    fn from(config: WidgetConfig) -> Self {
        Self {
            id: config.id.0,
            name: config.name,
            widget_type: config.mapping.type_name(),
            mapping: config.mapping.to_value(),
            data_source: config.data_source,
            tool: config.tool,
            args: config.args,
            refresh: config.refresh,
            click_action: config.click_action,
            click_target: config.click_target,
            position: config.position,
            style: config.style,
            permissions: config.permissions,
            published: config.published,
            created_at: config.created_at,
            updated_at: config.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Result<WidgetConfig, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn stats_card_reads_its_own_fields() {
        let config = parse(json!({
            "id": "w1",
            "name": "Products",
            "type": "stats-card",
            "dataSource": "shop",
            "tool": "count_products",
            "mapping": {"value": "$.total", "subtitle": "{{label}}", "rows": "ignored"},
            "published": true
        }))
        .unwrap();

        assert_eq!(config.widget_type(), Some(WidgetType::StatsCard));
        let WidgetMapping::StatsCard(mapping) = &config.mapping else {
            panic!("expected stats-card mapping");
        };
        assert_eq!(mapping.value.as_deref(), Some("$.total"));
        assert_eq!(mapping.subtitle.as_deref(), Some("{{label}}"));
    }

    #[test]
    fn unknown_type_is_kept_verbatim() {
        let config = parse(json!({
            "id": "w2",
            "type": "gauge",
            "dataSource": "metrics",
            "tool": "cpu",
            "mapping": {"needle": "$.cpu"}
        }))
        .unwrap();

        assert_eq!(config.widget_type(), None);
        assert_eq!(config.mapping.type_name(), "gauge");
        assert_eq!(config.mapping.to_value(), json!({"needle": "$.cpu"}));
    }

    #[test]
    fn empty_tool_is_rejected() {
        let err = parse(json!({
            "id": "w3",
            "type": "list",
            "dataSource": "shop",
            "tool": "  "
        }))
        .unwrap_err();
        assert!(err.to_string().contains("tool must not be empty"), "{err}");
    }

    #[test]
    fn malformed_interval_is_rejected_at_load() {
        let err = parse(json!({
            "id": "w4",
            "type": "list",
            "dataSource": "shop",
            "tool": "orders",
            "refresh": {"enabled": true, "interval": "often"}
        }))
        .unwrap_err();
        assert!(err.to_string().contains("often"), "{err}");
    }

    #[test]
    fn wrong_mapping_shape_is_rejected() {
        let err = parse(json!({
            "id": "w5",
            "type": "data-table",
            "dataSource": "shop",
            "tool": "orders",
            "mapping": {"columns": "not-a-list"}
        }))
        .unwrap_err();
        assert!(err.to_string().contains("data-table"), "{err}");
    }

    #[test]
    fn wire_shape_survives_serialization() {
        let wire = json!({
            "id": "w6",
            "name": "Orders",
            "type": "data-table",
            "dataSource": "shop",
            "tool": "orders",
            "args": {"limit": 5},
            "mapping": {
                "rows": "$.orders",
                "columns": [{"key": "id", "label": "ID", "sortable": true}]
            },
            "refresh": {"enabled": true, "interval": "30s", "onFocus": true},
            "permissions": {"roles": ["admin"]},
            "published": true
        });

        let config = parse(wire.clone()).unwrap();
        assert_eq!(config.refresh_period(), Some(Duration::from_secs(30)));
        assert_eq!(serde_json::to_value(&config).unwrap(), wire);
    }

    #[test]
    fn click_requires_action_and_target() {
        let mut config = parse(json!({
            "id": "w7",
            "type": "list",
            "dataSource": "shop",
            "tool": "orders",
            "clickAction": "navigate",
            "clickTarget": "/orders/{{id}}"
        }))
        .unwrap();
        assert_eq!(config.click(), Some((ClickAction::Navigate, "/orders/{{id}}")));

        config.click_action = Some(ClickAction::None);
        assert_eq!(config.click(), None);
    }

    #[test]
    fn disabled_refresh_has_no_period() {
        let config = parse(json!({
            "id": "w8",
            "type": "text",
            "dataSource": "cms",
            "tool": "banner",
            "refresh": {"enabled": false, "interval": "1h"}
        }))
        .unwrap();
        assert_eq!(config.refresh_period(), None);
    }
}
