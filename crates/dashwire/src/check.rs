// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `dashwire check`: validate settings and a widget catalog.

use std::path::Path;

use dashwire_config::DashwireConfig;
use dashwire_core::{CatalogEntry, DashwireError};

use crate::session::{catalog_path, load_catalog_reported};

/// Settings are already validated by the time this runs. Loads the catalog,
/// prints its diagnostics, and fails when it has errors.
pub fn run_check(config: &DashwireConfig, catalog: Option<&Path>) -> Result<(), DashwireError> {
    let path = catalog_path(config, catalog)?;
    let catalog = load_catalog_reported(&path)?;

    let disabled = catalog
        .widgets()
        .filter(|entry| matches!(entry, CatalogEntry::Disabled(_)))
        .count();
    println!(
        "{}: {} widget(s), {} disabled, {} dashboard(s)",
        path.display(),
        catalog.len(),
        disabled,
        catalog.dashboards().len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testdata;

    #[test]
    fn valid_catalog_passes() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog_path, _) = testdata::write_workspace(dir.path());
        run_check(&DashwireConfig::default(), Some(&catalog_path)).unwrap();
    }

    #[test]
    fn duplicate_widgets_fail() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let widget = r#"{"id": "a", "name": "A", "type": "text", "dataSource": "s", "tool": "t", "mapping": {}}"#;
        std::fs::write(&path, format!(r#"{{"widgets": [{widget}, {widget}]}}"#)).unwrap();

        let err = run_check(&DashwireConfig::default(), Some(&path)).unwrap_err();
        assert!(err.to_string().contains("1 error(s)"), "{err}");
    }

    #[test]
    fn missing_catalog_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert!(run_check(&DashwireConfig::default(), Some(&path)).is_err());
    }
}
