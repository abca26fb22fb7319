// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Widget catalog loading at the configuration boundary.
//!
//! A catalog file is JSON holding `widgets` and `dashboards` arrays in the
//! wire shape. Widgets are validated one by one: a widget that fails is kept
//! as a disabled entry and reported as a warning, so one bad definition never
//! takes the rest of the catalog down. Structural problems (unparsable JSON,
//! duplicate ids) are fatal.

use std::collections::HashSet;
use std::path::Path;

use dashwire_core::{
    CatalogEntry, DashboardConfig, DisabledWidget, WidgetCatalog, WidgetConfig, WidgetId,
    WidgetPermissions,
};
use miette::{NamedSource, SourceSpan};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::diagnostic::{ConfigError, suggest_key};

/// A usable catalog plus the warnings produced while loading it.
#[derive(Debug, Default)]
pub struct LoadedCatalog {
    pub catalog: WidgetCatalog,
    pub warnings: Vec<ConfigError>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    widgets: Vec<Value>,
    #[serde(default)]
    dashboards: Vec<Value>,
}

/// Load and validate a catalog file.
pub fn load_catalog(path: &Path) -> Result<LoadedCatalog, Vec<ConfigError>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        vec![ConfigError::Other(format!(
            "cannot read catalog {}: {e}",
            path.display()
        ))]
    })?;
    load_catalog_str(&content, &path.display().to_string())
}

/// Load and validate catalog JSON. `source_name` labels diagnostics.
pub fn load_catalog_str(
    content: &str,
    source_name: &str,
) -> Result<LoadedCatalog, Vec<ConfigError>> {
    let file: CatalogFile = serde_json::from_str(content).map_err(|e| {
        let offset = byte_offset(content, e.line(), e.column());
        vec![ConfigError::Catalog {
            message: e.to_string(),
            span: Some(SourceSpan::new(offset.into(), 0)),
            src: Some(NamedSource::new(source_name, content.to_string())),
        }]
    })?;

    let mut fatal = Vec::new();
    let mut warnings = Vec::new();
    let mut catalog = WidgetCatalog::new();

    for (index, raw) in file.widgets.into_iter().enumerate() {
        let Some(id) = raw
            .get("id")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(WidgetId::from)
        else {
            warn!(index, "skipping catalog widget without an id");
            warnings.push(ConfigError::InvalidWidget {
                widget_id: format!("widgets[{index}]"),
                message: "widget has no id and cannot be referenced".to_string(),
            });
            continue;
        };

        let entry = parse_widget(id.clone(), raw);
        if let CatalogEntry::Disabled(disabled) = &entry {
            warn!(widget_id = %id, reason = %disabled.reason, "widget disabled by configuration error");
            warnings.push(ConfigError::InvalidWidget {
                widget_id: id.to_string(),
                message: disabled.reason.clone(),
            });
        }

        if catalog.insert(entry).is_some() {
            fatal.push(ConfigError::Catalog {
                message: format!("duplicate widget id `{id}`"),
                span: None,
                src: None,
            });
        }
    }

    let known: Vec<String> = catalog.widgets().map(|e| e.id().to_string()).collect();
    let known_refs: Vec<&str> = known.iter().map(String::as_str).collect();
    let mut dashboard_ids = HashSet::new();

    for (index, raw) in file.dashboards.into_iter().enumerate() {
        let dashboard: DashboardConfig = match serde_json::from_value(raw) {
            Ok(dashboard) => dashboard,
            Err(e) => {
                fatal.push(ConfigError::Catalog {
                    message: format!("dashboards[{index}]: {e}"),
                    span: None,
                    src: None,
                });
                continue;
            }
        };

        if !dashboard_ids.insert(dashboard.id.clone()) {
            fatal.push(ConfigError::Catalog {
                message: format!("duplicate dashboard id `{}`", dashboard.id),
                span: None,
                src: None,
            });
        }

        for duplicate in dashboard.duplicate_widget_ids() {
            fatal.push(ConfigError::Catalog {
                message: format!(
                    "dashboard `{}` lists widget `{duplicate}` more than once",
                    dashboard.id
                ),
                span: None,
                src: None,
            });
        }

        for widget_id in &dashboard.widgets {
            if catalog.get(widget_id).is_none() {
                debug!(dashboard_id = %dashboard.id, widget_id = %widget_id, "dashboard references unknown widget");
                warnings.push(ConfigError::UnknownReference {
                    dashboard_id: dashboard.id.clone(),
                    widget_id: widget_id.to_string(),
                    suggestion: suggest_key(widget_id.as_str(), &known_refs),
                });
            }
        }

        catalog.add_dashboard(dashboard);
    }

    if fatal.is_empty() {
        Ok(LoadedCatalog { catalog, warnings })
    } else {
        fatal.extend(warnings);
        Err(fatal)
    }
}

/// Parse one widget, falling back to a disabled entry on failure.
///
/// Visibility fields are recovered from the raw object so the placeholder
/// obeys the same rules. Unparsable permissions admit nobody.
fn parse_widget(id: WidgetId, raw: Value) -> CatalogEntry {
    let permissions = match raw.get("permissions") {
        None | Some(Value::Null) => None,
        Some(p) => Some(
            serde_json::from_value::<WidgetPermissions>(p.clone()).unwrap_or_default(),
        ),
    };
    let published = raw
        .get("published")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    match serde_json::from_value::<WidgetConfig>(raw) {
        Ok(config) => CatalogEntry::Ready(config.into_shared()),
        Err(e) => CatalogEntry::Disabled(DisabledWidget {
            id,
            reason: e.to_string(),
            permissions,
            published,
        }),
    }
}

/// Byte offset of a 1-based line/column position.
fn byte_offset(content: &str, line: usize, column: usize) -> usize {
    let line_start: usize = content
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(content.len())
}
