// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for engine settings.
//!
//! Validates semantic constraints that serde attributes cannot express.

use dashwire_mapping::NumberLocale;

use crate::diagnostic::ConfigError;
use crate::model::DashwireConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first.
pub fn validate_config(config: &DashwireConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.engine.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "engine.name must not be empty".to_string(),
        });
    }

    if config.render.page_size < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "render.page_size must be at least 1, got {}",
                config.render.page_size
            ),
        });
    }

    if config.render.locale.parse::<NumberLocale>().is_err() {
        errors.push(ConfigError::Validation {
            message: format!(
                "render.locale `{}` is not supported (expected one of {})",
                config.render.locale,
                supported_locales()
            ),
        });
    }

    if config.cache.default_stale_after_secs < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "cache.default_stale_after_secs must be at least 1, got {}",
                config.cache.default_stale_after_secs
            ),
        });
    }

    if config.fetch.timeout_secs < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "fetch.timeout_secs must be at least 1, got {}",
                config.fetch.timeout_secs
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn supported_locales() -> String {
    use strum::IntoEnumIterator;

    NumberLocale::iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
