// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./dashwire.toml` > `~/.config/dashwire/dashwire.toml`
//! > `/etc/dashwire/dashwire.toml`, with environment variable overrides via the
//! `DASHWIRE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::DashwireConfig;

pub(crate) const SYSTEM_CONFIG_PATH: &str = "/etc/dashwire/dashwire.toml";
pub(crate) const LOCAL_CONFIG_PATH: &str = "dashwire.toml";

pub(crate) fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("dashwire/dashwire.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/dashwire/dashwire.toml` (system-wide)
/// 3. `~/.config/dashwire/dashwire.toml` (user XDG config)
/// 4. `./dashwire.toml` (local directory)
/// 5. `DASHWIRE_*` environment variables
pub fn load_config() -> Result<DashwireConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<DashwireConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DashwireConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<DashwireConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DashwireConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The layered Figment before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(DashwireConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Environment provider with an explicit section mapping.
///
/// Only the section prefix is split off:
/// `DASHWIRE_CACHE_DEFAULT_STALE_AFTER_SECS` maps to
/// `cache.default_stale_after_secs`.
fn env_provider() -> Env {
    Env::prefixed("DASHWIRE_").map(|key| {
        let key = key.as_str().to_ascii_lowercase();
        let mapped = ENV_SECTIONS
            .iter()
            .find_map(|section| {
                key.strip_prefix(section)
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|field| format!("{section}.{field}"))
            })
            .unwrap_or(key);
        mapped.into()
    })
}

const ENV_SECTIONS: [&str; 5] = ["engine", "render", "cache", "fetch", "catalog"];
