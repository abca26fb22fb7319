// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-record views: stats cards, product cards, text, and custom fields.

use std::collections::BTreeMap;

use dashwire_core::{
    ClickAction, CustomMapping, ProductCardMapping, StatsCardMapping, TextMapping,
};
use dashwire_mapping::{display_string, resolve, resolve_present, substitute};
use serde_json::Value;

use crate::outcome::WidgetView;
use crate::renderer::{Renderer, click_target};

pub(crate) fn stats_card(
    renderer: &Renderer,
    mapping: &StatsCardMapping,
    data: &Value,
    click: Option<(ClickAction, &str)>,
) -> WidgetView {
    let value = renderer.scalar(resolve(data, mapping.value.as_deref()));
    let subtitle = mapping
        .subtitle
        .as_deref()
        .map(|template| substitute(template, data));
    let trend = mapping
        .trend
        .as_deref()
        .and_then(|path| resolve_present(data, Some(path)))
        .map(|v| renderer.scalar(Some(v)));

    WidgetView::StatsCard {
        value,
        subtitle,
        icon: mapping.icon.clone(),
        trend,
        target: click_target(click, data),
    }
}

pub(crate) fn product_card(
    renderer: &Renderer,
    mapping: &ProductCardMapping,
    data: &Value,
) -> WidgetView {
    let text_at = |path: Option<&str>| {
        path.and_then(|p| resolve_present(data, Some(p)))
            .map(display_string)
            .filter(|s| !s.is_empty())
    };

    let price = mapping
        .price
        .as_deref()
        .and_then(|p| resolve_present(data, Some(p)))
        .map(|v| renderer.number(v).unwrap_or_else(|| display_string(v)))
        .map(|amount| match mapping.currency.as_deref() {
            Some(currency) => format!("{amount} {currency}"),
            None => amount,
        });

    WidgetView::ProductCard {
        image: text_at(mapping.image.as_deref()),
        title: text_at(mapping.title.as_deref()),
        description: text_at(mapping.description.as_deref()),
        price,
    }
}

pub(crate) fn text(mapping: &TextMapping, data: &Value) -> WidgetView {
    let text = match mapping.item_template.as_deref() {
        Some(template) => substitute(template, data),
        None => resolve_present(data, mapping.value.as_deref())
            .map(display_string)
            .unwrap_or_else(|| "-".to_string()),
    };
    WidgetView::Text { text }
}

pub(crate) fn custom(mapping: &CustomMapping, data: &Value) -> WidgetView {
    if mapping.fields.is_empty() {
        return WidgetView::raw(data);
    }

    let fields: BTreeMap<String, Value> = mapping
        .fields
        .iter()
        .map(|(name, path)| {
            let value = resolve(data, Some(path.as_str())).cloned().unwrap_or(Value::Null);
            (name.clone(), value)
        })
        .collect();
    WidgetView::Custom { fields }
}
