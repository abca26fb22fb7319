// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Viewer visibility rules for widgets and dashboards.

use dashwire_core::{CatalogEntry, DashboardConfig, Viewer, WidgetCatalog, WidgetPermissions};
use tracing::{debug, warn};

/// Whether `viewer` may see something guarded by `perm`.
///
/// `public` admits everyone. Otherwise the viewer needs a role in
/// `perm.roles` or their id in `perm.users`.
pub fn is_visible(perm: &WidgetPermissions, viewer: &Viewer) -> bool {
    if perm.public {
        return true;
    }
    perm.roles.iter().any(|role| viewer.roles.contains(role)) || perm.users.contains(&viewer.id)
}

/// The catalog entries of `dashboard` that `viewer` may see, in display order.
///
/// The dashboard's own permissions are checked first and deny everything
/// when they fail. Widgets without permissions are visible. Denied,
/// unpublished (unless `include_unpublished`), and unknown widgets are
/// left out entirely.
pub fn resolve_dashboard(
    dashboard: &DashboardConfig,
    catalog: &WidgetCatalog,
    viewer: &Viewer,
    include_unpublished: bool,
) -> Vec<CatalogEntry> {
    if let Some(perm) = &dashboard.permissions {
        if !is_visible(perm, viewer) {
            debug!(dashboard_id = %dashboard.id, viewer_id = %viewer.id, "dashboard denied to viewer");
            return Vec::new();
        }
    }

    dashboard
        .widgets
        .iter()
        .filter_map(|id| {
            let Some(entry) = catalog.get(id) else {
                warn!(dashboard_id = %dashboard.id, widget_id = %id, "dashboard references unknown widget, skipping");
                return None;
            };
            if !entry.published() && !include_unpublished {
                debug!(widget_id = %id, "skipping unpublished widget");
                return None;
            }
            if let Some(perm) = entry.permissions() {
                if !is_visible(perm, viewer) {
                    debug!(widget_id = %id, viewer_id = %viewer.id, "widget denied to viewer");
                    return None;
                }
            }
            Some(entry.clone())
        })
        .collect()
}
