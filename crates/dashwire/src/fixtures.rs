// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-backed tool client.
//!
//! Each tool is a JSON file at `<root>/<dataSource>/<tool>.json` holding a
//! `WidgetDataResponse`. Files are re-read on every call, so editing one
//! while `watch` runs shows up on the next refresh.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use dashwire_core::{DashwireError, ToolClient, WidgetDataResponse};
use serde_json::Value;
use tracing::debug;

pub struct FixtureToolClient {
    root: PathBuf,
}

impl FixtureToolClient {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn fixture_path(&self, data_source: &str, tool: &str) -> Option<PathBuf> {
        if !is_plain_segment(data_source) || !is_plain_segment(tool) {
            return None;
        }
        Some(self.root.join(data_source).join(format!("{tool}.json")))
    }
}

/// A single path component that cannot climb out of the fixture root.
fn is_plain_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && !segment.contains(['/', '\\'])
}

#[async_trait]
impl ToolClient for FixtureToolClient {
    async fn invoke(
        &self,
        data_source: &str,
        tool: &str,
        _args: Option<&Value>,
    ) -> Result<WidgetDataResponse, DashwireError> {
        let not_found = || DashwireError::ToolNotFound {
            data_source: data_source.to_string(),
            tool: tool.to_string(),
        };
        let path = self.fixture_path(data_source, tool).ok_or_else(not_found)?;

        debug!(path = %path.display(), "reading fixture");
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(not_found()),
            Err(e) => {
                return Err(DashwireError::Fetch {
                    message: format!("cannot read fixture {}: {e}", path.display()),
                    source: Some(Box::new(e)),
                });
            }
        };

        serde_json::from_str(&content).map_err(|e| DashwireError::Fetch {
            message: format!("invalid fixture {}: {e}", path.display()),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::Path;

    fn write_fixture(root: &Path, data_source: &str, tool: &str, body: &str) {
        let dir = root.join(data_source);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(format!("{tool}.json")), body).unwrap();
    }

    #[tokio::test]
    async fn reads_response_files() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(
            dir.path(),
            "shop",
            "orders",
            r#"{"success": true, "data": {"total": 23141}, "refreshIn": 30}"#,
        );
        let client = FixtureToolClient::new(dir.path());

        let response = client.invoke("shop", "orders", None).await.unwrap();
        assert!(response.success);
        assert_eq!(response.data, Some(json!({"total": 23141})));
        assert_eq!(response.refresh_in, Some(30));
    }

    #[tokio::test]
    async fn missing_file_is_tool_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let client = FixtureToolClient::new(dir.path());

        let err = client.invoke("shop", "orders", None).await.unwrap_err();
        assert!(matches!(err, DashwireError::ToolNotFound { .. }));
    }

    #[tokio::test]
    async fn path_segments_cannot_escape_root() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), "shop", "orders", r#"{"success": true}"#);
        let client = FixtureToolClient::new(dir.path().join("shop"));

        for (data_source, tool) in [("..", "orders"), ("shop", "../orders"), ("", "orders")] {
            let err = client.invoke(data_source, tool, None).await.unwrap_err();
            assert!(matches!(err, DashwireError::ToolNotFound { .. }), "{data_source}/{tool}");
        }
    }

    #[tokio::test]
    async fn malformed_file_is_a_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), "shop", "orders", "{not json");
        let client = FixtureToolClient::new(dir.path());

        let err = client.invoke("shop", "orders", None).await.unwrap_err();
        assert!(err.is_fetch_failure());
        assert!(err.to_string().contains("invalid fixture"));
    }
}
