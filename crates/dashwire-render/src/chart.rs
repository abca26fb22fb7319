// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chart data resolution. Drawing is left to the UI.

use dashwire_core::ChartMapping;
use dashwire_mapping::{as_number, display_string, resolve};
use serde_json::Value;

use crate::outcome::{ChartSeries, WidgetView};

pub(crate) fn render_chart(mapping: &ChartMapping, data: &Value) -> WidgetView {
    let chart_type = mapping.chart_type.unwrap_or_default();

    let labels = match mapping.labels.as_deref() {
        Some(path) => match resolve(data, Some(path)) {
            Some(Value::Array(labels)) => labels.iter().map(display_string).collect(),
            _ => Vec::new(),
        },
        None => Vec::new(),
    };

    let datasets = mapping
        .datasets
        .iter()
        .map(|dataset| {
            let values = match resolve(data, Some(dataset.data_path.as_str())) {
                Some(Value::Array(points)) => points.iter().map(as_number).collect(),
                _ => Vec::new(),
            };
            ChartSeries {
                label: dataset.label.clone(),
                color: dataset.color.clone(),
                series_type: dataset.series_type.unwrap_or(chart_type),
                values,
            }
        })
        .collect();

    WidgetView::Chart {
        chart_type,
        labels,
        datasets,
    }
}
