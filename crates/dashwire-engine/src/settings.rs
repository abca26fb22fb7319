// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runtime settings derived from [`DashwireConfig`].

use std::time::Duration;

use dashwire_config::DashwireConfig;
use dashwire_core::DashwireError;
use dashwire_mapping::{NumberFormatter, NumberLocale};
use dashwire_render::{DEFAULT_PAGE_SIZE, Renderer};

#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub page_size: usize,
    pub locale: NumberLocale,
    pub max_fraction_digits: usize,
    /// Freshness window when neither the response nor the widget gives one.
    pub default_stale_after: Duration,
    /// Upper bound on one tool client call.
    pub fetch_timeout: Duration,
    pub include_unpublished: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            locale: NumberLocale::default(),
            max_fraction_digits: 3,
            default_stale_after: Duration::from_secs(60),
            fetch_timeout: Duration::from_secs(30),
            include_unpublished: false,
        }
    }
}

impl EngineSettings {
    pub fn from_config(config: &DashwireConfig) -> Result<Self, DashwireError> {
        let locale = config.render.locale.parse::<NumberLocale>().map_err(|_| {
            DashwireError::Config(format!(
                "unsupported render.locale `{}`",
                config.render.locale
            ))
        })?;

        Ok(Self {
            page_size: config.render.page_size,
            locale,
            max_fraction_digits: config.render.max_fraction_digits,
            default_stale_after: Duration::from_secs(config.cache.default_stale_after_secs),
            fetch_timeout: Duration::from_secs(config.fetch.timeout_secs),
            include_unpublished: config.catalog.include_unpublished,
        })
    }

    pub fn renderer(&self) -> Renderer {
        Renderer::new(
            self.page_size,
            NumberFormatter::new(self.locale, self.max_fraction_digits),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_agree_with_config_defaults() {
        let from_config = EngineSettings::from_config(&DashwireConfig::default()).unwrap();
        assert_eq!(from_config, EngineSettings::default());
    }

    #[test]
    fn unknown_locale_is_config_error() {
        let mut config = DashwireConfig::default();
        config.render.locale = "xx".into();
        assert!(matches!(
            EngineSettings::from_config(&config),
            Err(DashwireError::Config(_))
        ));
    }
}
