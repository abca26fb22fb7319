// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! List and search-result rendering.

use dashwire_core::{ClickAction, ListMapping, SearchBoxMapping};
use dashwire_mapping::{display_string, resolve, substitute};
use serde_json::Value;
use tracing::debug;

use crate::outcome::{ListItem, WidgetView};
use crate::renderer::{Renderer, click_target};

pub(crate) fn render_list(
    renderer: &Renderer,
    mapping: &ListMapping,
    data: &Value,
    click: Option<(ClickAction, &str)>,
) -> WidgetView {
    let Some(Value::Array(items)) = resolve(data, mapping.items.as_deref()) else {
        debug!(items_path = ?mapping.items, "list items did not resolve to an array, rendering raw view");
        return WidgetView::raw(data);
    };

    let page_size = renderer.page_size(mapping.page_size);
    WidgetView::List {
        items: items
            .iter()
            .take(page_size)
            .map(|item| list_item(item, mapping.item_template.as_deref(), click))
            .collect(),
        total_items: items.len(),
        truncated: items.len() > page_size,
    }
}

pub(crate) fn render_search_box(
    renderer: &Renderer,
    mapping: &SearchBoxMapping,
    data: &Value,
    click: Option<(ClickAction, &str)>,
) -> WidgetView {
    let results = match mapping.results.as_deref() {
        Some(path) => match resolve(data, Some(path)) {
            Some(Value::Array(items)) => items
                .iter()
                .take(renderer.page_size(None))
                .map(|item| list_item(item, mapping.item_template.as_deref(), click))
                .collect(),
            _ => Vec::new(),
        },
        None => Vec::new(),
    };

    WidgetView::SearchBox {
        placeholder: mapping.placeholder.clone(),
        query_arg: mapping.query_arg.clone(),
        results,
    }
}

/// Objects use the item template when one is set, else compact JSON.
/// Scalars use their plain string form.
fn list_item(item: &Value, template: Option<&str>, click: Option<(ClickAction, &str)>) -> ListItem {
    let text = match (item, template) {
        (Value::Object(_), Some(template)) => substitute(template, item),
        (Value::Object(_) | Value::Array(_), _) => item.to_string(),
        (other, _) => display_string(other),
    };

    ListItem {
        text,
        target: click_target(click, item),
    }
}
