// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Engine settings model.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level Dashwire configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DashwireConfig {
    /// Engine identity and logging.
    #[serde(default)]
    pub engine: EngineSection,

    /// Renderer defaults.
    #[serde(default)]
    pub render: RenderConfig,

    /// Response cache freshness.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Tool client call settings.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Widget catalog location and filtering.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineSection {
    /// Instance name, used in log output.
    #[serde(default = "default_engine_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            name: default_engine_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_engine_name() -> String {
    "dashwire".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Rows or items shown by tables and lists without a `pageSize`.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// BCP 47 tag selecting digit grouping and decimal separators.
    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default = "default_max_fraction_digits")]
    pub max_fraction_digits: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            locale: default_locale(),
            max_fraction_digits: default_max_fraction_digits(),
        }
    }
}

fn default_page_size() -> usize {
    10
}

fn default_locale() -> String {
    "de-DE".to_string()
}

fn default_max_fraction_digits() -> usize {
    3
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Freshness window when neither the response's `refreshIn` nor an
    /// enabled refresh interval provides one.
    #[serde(default = "default_stale_after_secs")]
    pub default_stale_after_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_stale_after_secs: default_stale_after_secs(),
        }
    }
}

fn default_stale_after_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    /// Upper bound on a single tool client call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// JSON catalog of widgets and dashboards.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Keep unpublished widgets in resolved dashboards.
    #[serde(default)]
    pub include_unpublished: bool,
}
