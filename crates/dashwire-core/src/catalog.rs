// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory catalog of validated widget and dashboard configurations.

use std::collections::HashMap;
use std::sync::Arc;

use crate::dashboard::DashboardConfig;
use crate::types::WidgetId;
use crate::widget::{WidgetConfig, WidgetPermissions};

/// A widget whose configuration failed validation at load time.
///
/// Disabled widgets render as a configuration-error placeholder and are
/// never fetched or retried. `permissions` and `published` are recovered on
/// a best-effort basis so the visibility rules still apply to the placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct DisabledWidget {
    pub id: WidgetId,
    pub reason: String,
    pub permissions: Option<WidgetPermissions>,
    pub published: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEntry {
    Ready(Arc<WidgetConfig>),
    Disabled(DisabledWidget),
}

impl CatalogEntry {
    pub fn id(&self) -> &WidgetId {
        match self {
            Self::Ready(config) => &config.id,
            Self::Disabled(disabled) => &disabled.id,
        }
    }

    pub fn permissions(&self) -> Option<&WidgetPermissions> {
        match self {
            Self::Ready(config) => config.permissions.as_ref(),
            Self::Disabled(disabled) => disabled.permissions.as_ref(),
        }
    }

    pub fn published(&self) -> bool {
        match self {
            Self::Ready(config) => config.published,
            Self::Disabled(disabled) => disabled.published,
        }
    }

    pub fn config(&self) -> Option<&Arc<WidgetConfig>> {
        match self {
            Self::Ready(config) => Some(config),
            Self::Disabled(_) => None,
        }
    }
}

/// Widgets indexed by id, plus the dashboards that reference them.
#[derive(Debug, Clone, Default)]
pub struct WidgetCatalog {
    widgets: HashMap<WidgetId, CatalogEntry>,
    dashboards: Vec<DashboardConfig>,
}

impl WidgetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a widget entry, returning the previous one.
    pub fn insert(&mut self, entry: CatalogEntry) -> Option<CatalogEntry> {
        self.widgets.insert(entry.id().clone(), entry)
    }

    pub fn insert_widget(&mut self, config: WidgetConfig) -> Option<CatalogEntry> {
        self.insert(CatalogEntry::Ready(Arc::new(config)))
    }

    pub fn add_dashboard(&mut self, dashboard: DashboardConfig) {
        self.dashboards.push(dashboard);
    }

    pub fn get(&self, id: &WidgetId) -> Option<&CatalogEntry> {
        self.widgets.get(id)
    }

    pub fn dashboard(&self, id: &str) -> Option<&DashboardConfig> {
        self.dashboards.iter().find(|d| d.id == id)
    }

    /// The dashboard flagged `isDefault`, else the first one.
    pub fn default_dashboard(&self) -> Option<&DashboardConfig> {
        self.dashboards
            .iter()
            .find(|d| d.is_default)
            .or_else(|| self.dashboards.first())
    }

    pub fn dashboards(&self) -> &[DashboardConfig] {
        &self.dashboards
    }

    pub fn widgets(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.widgets.values()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}
