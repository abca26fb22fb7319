// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data-table rendering with optional column sorting and paging.

use std::borrow::Cow;
use std::cmp::Ordering;

use dashwire_core::{ClickAction, ColumnType, TableMapping, WidgetTableColumn};
use dashwire_mapping::{as_number, display_string, resolve};
use serde_json::Value;
use tracing::debug;

use crate::outcome::{ColumnHeader, TableRow, WidgetView};
use crate::renderer::{Renderer, SortDirection, SortSpec, click_target};

pub(crate) fn render_table(
    renderer: &Renderer,
    mapping: &TableMapping,
    data: &Value,
    click: Option<(ClickAction, &str)>,
    sort: Option<&SortSpec>,
) -> WidgetView {
    let Some(Value::Array(rows)) = resolve(data, mapping.rows.as_deref()) else {
        debug!(rows_path = ?mapping.rows, "table rows did not resolve to an array, rendering raw view");
        return WidgetView::raw(data);
    };

    let columns: Cow<'_, [WidgetTableColumn]> = if mapping.columns.is_empty() {
        Cow::Owned(infer_columns(rows))
    } else {
        Cow::Borrowed(&mapping.columns[..])
    };

    let mut ordered: Vec<&Value> = rows.iter().collect();
    if let Some(spec) = sort {
        sort_rows(&mut ordered, &columns, spec);
    }

    let page_size = renderer.page_size(mapping.page_size);
    let rendered = ordered
        .iter()
        .take(page_size)
        .map(|row| TableRow {
            cells: columns.iter().map(|c| cell(renderer, c, row)).collect(),
            target: click_target(click, row),
        })
        .collect();

    WidgetView::Table {
        columns: columns
            .iter()
            .map(|c| ColumnHeader {
                key: c.key.clone(),
                label: c.label.clone(),
                sortable: c.sortable,
                width: c.width.clone(),
            })
            .collect(),
        rows: rendered,
        total_rows: rows.len(),
        truncated: rows.len() > page_size,
    }
}

/// Columns from the keys of the first object row, when none are configured.
fn infer_columns(rows: &[Value]) -> Vec<WidgetTableColumn> {
    rows.iter()
        .find_map(Value::as_object)
        .map(|first| {
            first
                .keys()
                .map(|key| WidgetTableColumn {
                    key: key.clone(),
                    label: key.clone(),
                    column_type: None,
                    sortable: false,
                    width: None,
                })
                .collect()
        })
        .unwrap_or_default()
}

fn field<'a>(row: &'a Value, key: &str) -> Option<&'a Value> {
    row.as_object()
        .and_then(|r| r.get(key))
        .filter(|v| !v.is_null())
}

fn cell(renderer: &Renderer, column: &WidgetTableColumn, row: &Value) -> String {
    let Some(value) = field(row, &column.key) else {
        return "-".to_string();
    };

    match column.column_type {
        Some(ColumnType::Number | ColumnType::Currency) => renderer
            .number(value)
            .unwrap_or_else(|| display_string(value)),
        Some(ColumnType::Boolean) => match value {
            Value::Bool(true) => "✓".to_string(),
            Value::Bool(false) => "✗".to_string(),
            other => display_string(other),
        },
        _ => display_string(value),
    }
}

fn sort_rows(rows: &mut [&Value], columns: &[WidgetTableColumn], spec: &SortSpec) {
    let sortable = columns
        .iter()
        .any(|c| c.key == spec.column && c.sortable);
    if !sortable {
        debug!(column = %spec.column, "ignoring sort on a column that is not sortable");
        return;
    }

    rows.sort_by(|a, b| compare(field(a, &spec.column), field(b, &spec.column), spec.direction));
}

/// Numbers compare numerically, everything else by display string.
/// Missing values sort last in either direction.
fn compare(a: Option<&Value>, b: Option<&Value>, direction: SortDirection) -> Ordering {
    let (a, b) = match (a, b) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Greater,
        (Some(_), None) => return Ordering::Less,
        (Some(a), Some(b)) => (a, b),
    };

    let ordering = match (as_number(a), as_number(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => display_string(a).cmp(&display_string(b)),
    };

    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}
