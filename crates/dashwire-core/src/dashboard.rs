// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dashboard configuration model.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::WidgetId;
use crate::widget::WidgetPermissions;

/// An ordered, permission-filtered collection of widget references.
///
/// `widgets` order is display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub widgets: Vec<WidgetId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
    #[serde(default)]
    pub published: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<WidgetPermissions>,
}

impl DashboardConfig {
    /// Widget ids that appear more than once, in first-repeat order.
    pub fn duplicate_widget_ids(&self) -> Vec<&WidgetId> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for id in &self.widgets {
            if !seen.insert(id) && !duplicates.contains(&id) {
                duplicates.push(id);
            }
        }
        duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_wire_shape() {
        let dashboard: DashboardConfig = serde_json::from_value(json!({
            "id": "main",
            "name": "Main",
            "widgets": ["a", "b"],
            "columns": 3,
            "published": true,
            "isDefault": true,
            "permissions": {"roles": ["staff"]}
        }))
        .unwrap();

        assert_eq!(dashboard.widgets, vec![WidgetId::from("a"), WidgetId::from("b")]);
        assert!(dashboard.is_default);
        assert_eq!(dashboard.permissions.unwrap().roles, vec!["staff"]);
    }

    #[test]
    fn reports_each_duplicate_once() {
        let dashboard: DashboardConfig = serde_json::from_value(json!({
            "id": "main",
            "widgets": ["a", "b", "a", "a", "c", "b"]
        }))
        .unwrap();

        let duplicates: Vec<&str> = dashboard
            .duplicate_widget_ids()
            .into_iter()
            .map(|id| id.as_str())
            .collect();
        assert_eq!(duplicates, vec!["a", "b"]);
    }
}
