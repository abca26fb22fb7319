// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Type dispatch from `(type, mapping, data)` to a render instruction.

use dashwire_core::{ClickAction, WidgetConfig, WidgetMapping};
use dashwire_mapping::{NumberFormatter, as_number, display_string, substitute};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::outcome::{ClickTarget, RenderOutcome, WidgetView};
use crate::{cards, chart, list, table};

/// Page size used when neither the engine settings nor the mapping set one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Sort resolved table rows by a sortable column before paging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub sort: Option<SortSpec>,
}

/// Pure, synchronous renderer. Never fails: missing data degrades to
/// placeholders, and shapes it cannot interpret fall back to the raw view.
#[derive(Debug, Clone)]
pub struct Renderer {
    page_size: usize,
    numbers: NumberFormatter,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, NumberFormatter::default())
    }
}

impl Renderer {
    pub fn new(page_size: usize, numbers: NumberFormatter) -> Self {
        Self {
            page_size: page_size.max(1),
            numbers,
        }
    }

    pub fn render(&self, config: &WidgetConfig, data: Option<&Value>) -> RenderOutcome {
        self.render_with(config, data, &RenderOptions::default())
    }

    pub fn render_with(
        &self,
        config: &WidgetConfig,
        data: Option<&Value>,
        options: &RenderOptions,
    ) -> RenderOutcome {
        let Some(data) = data.filter(|d| !d.is_null()) else {
            return RenderOutcome::Empty;
        };

        let click = config.click();
        let view = match &config.mapping {
            WidgetMapping::StatsCard(m) => cards::stats_card(self, m, data, click),
            WidgetMapping::DataTable(m) => {
                table::render_table(self, m, data, click, options.sort.as_ref())
            }
            WidgetMapping::Chart(m) => chart::render_chart(m, data),
            WidgetMapping::List(m) => list::render_list(self, m, data, click),
            WidgetMapping::SearchBox(m) => list::render_search_box(self, m, data, click),
            WidgetMapping::ProductCard(m) => cards::product_card(self, m, data),
            WidgetMapping::Text(m) => cards::text(m, data),
            WidgetMapping::Custom(m) => cards::custom(m, data),
            WidgetMapping::Unrecognized { type_name, .. } => {
                debug!(widget_id = %config.id, widget_type = %type_name, "unrecognized widget type, rendering raw view");
                WidgetView::raw(data)
            }
        };

        RenderOutcome::ok(view)
    }

    pub(crate) fn page_size(&self, mapping_override: Option<usize>) -> usize {
        mapping_override
            .filter(|n| *n > 0)
            .unwrap_or(self.page_size)
    }

    /// Locale-formatted number, or `None` if the value is not numeric.
    pub(crate) fn number(&self, value: &Value) -> Option<String> {
        self.numbers
            .format_value(value)
            .or_else(|| as_number(value).map(|n| self.numbers.format(n)))
    }

    /// Display form of a single resolved value. Absent and `null` render as `-`.
    pub(crate) fn scalar(&self, value: Option<&Value>) -> String {
        match value {
            None | Some(Value::Null) => "-".to_string(),
            Some(v @ Value::Number(_)) => self.numbers.format_value(v).unwrap_or_default(),
            Some(v) => display_string(v),
        }
    }
}

/// Expand the widget's click target against one record.
pub(crate) fn click_target(
    click: Option<(ClickAction, &str)>,
    context: &Value,
) -> Option<ClickTarget> {
    click.map(|(action, template)| ClickTarget {
        action,
        target: substitute(template, context),
    })
}
