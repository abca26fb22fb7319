// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog, dashboard, viewer, and engine setup shared by `render` and `watch`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashwire_config::{DashwireConfig, LoadedCatalog};
use dashwire_core::{DashboardConfig, DashwireError, Viewer, WidgetCatalog, WidgetId};
use dashwire_engine::{EngineSettings, UpdateBus, WidgetEngine};
use dashwire_render::RenderOutcome;
use serde::Serialize;
use tracing::info;

use crate::DashboardArgs;
use crate::fixtures::FixtureToolClient;

/// One widget's outcome as printed on stdout.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedWidget {
    pub widget_id: WidgetId,
    #[serde(flatten)]
    pub outcome: RenderOutcome,
}

pub struct DashboardSession {
    pub engine: WidgetEngine,
    pub catalog: WidgetCatalog,
    pub dashboard: DashboardConfig,
    pub viewer: Viewer,
}

impl DashboardSession {
    /// Load the catalog, pick the dashboard, and start an engine reading
    /// from the fixture directory. Must run inside a tokio runtime.
    pub fn open(config: &DashwireConfig, args: &DashboardArgs) -> Result<Self, DashwireError> {
        let path = catalog_path(config, args.catalog.as_deref())?;
        let catalog = load_catalog_reported(&path)?;
        let dashboard = select_dashboard(&catalog, args.dashboard.as_deref())?.clone();
        let viewer = Viewer {
            id: args.viewer.clone(),
            roles: args.roles.clone(),
        };

        let settings = EngineSettings::from_config(config)?;
        let client = Arc::new(FixtureToolClient::new(&args.fixtures));
        let engine = WidgetEngine::new(client, settings, UpdateBus::default());

        info!(
            dashboard_id = %dashboard.id,
            viewer_id = %viewer.id,
            fixtures = %args.fixtures.display(),
            "dashboard session opened"
        );
        Ok(Self {
            engine,
            catalog,
            dashboard,
            viewer,
        })
    }

    pub async fn render_all(&self) -> Vec<RenderedWidget> {
        self.engine
            .render_dashboard(&self.dashboard, &self.catalog, &self.viewer)
            .await
            .into_iter()
            .map(|(widget_id, outcome)| RenderedWidget { widget_id, outcome })
            .collect()
    }
}

/// `--catalog` wins over `catalog.path` from the settings.
pub fn catalog_path(
    config: &DashwireConfig,
    flag: Option<&Path>,
) -> Result<PathBuf, DashwireError> {
    flag.map(Path::to_path_buf)
        .or_else(|| config.catalog.path.clone())
        .ok_or_else(|| {
            DashwireError::Config("no catalog given: pass --catalog or set catalog.path".into())
        })
}

/// Load a catalog, printing warnings and errors as diagnostics.
pub fn load_catalog_reported(path: &Path) -> Result<WidgetCatalog, DashwireError> {
    match dashwire_config::load_catalog(path) {
        Ok(LoadedCatalog { catalog, warnings }) => {
            dashwire_config::render_errors(&warnings);
            Ok(catalog)
        }
        Err(errors) => {
            dashwire_config::render_errors(&errors);
            let fatal = errors.iter().filter(|e| !e.is_warning()).count();
            Err(DashwireError::Config(format!(
                "catalog {} has {fatal} error(s)",
                path.display()
            )))
        }
    }
}

pub fn select_dashboard<'a>(
    catalog: &'a WidgetCatalog,
    id: Option<&str>,
) -> Result<&'a DashboardConfig, DashwireError> {
    let found = match id {
        Some(id) => catalog.dashboard(id),
        None => catalog.default_dashboard(),
    };
    found.ok_or_else(|| {
        let known: Vec<&str> = catalog.dashboards().iter().map(|d| d.id.as_str()).collect();
        let wanted = id.unwrap_or("<default>");
        if known.is_empty() {
            DashwireError::Config(format!("dashboard `{wanted}` not found: catalog has no dashboards"))
        } else {
            DashwireError::Config(format!(
                "dashboard `{wanted}` not found, available: {}",
                known.join(", ")
            ))
        }
    })
}
