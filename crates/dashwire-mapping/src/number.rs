// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Locale-aware number formatting for display values.

use serde_json::Value;
use strum::{Display, EnumIter, EnumString};

/// Locales with known digit grouping and decimal conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
pub enum NumberLocale {
    #[strum(serialize = "en-US")]
    EnUs,
    #[strum(serialize = "en-GB")]
    EnGb,
    #[default]
    #[strum(serialize = "de-DE")]
    DeDe,
    #[strum(serialize = "de-CH")]
    DeCh,
    #[strum(serialize = "fr-FR")]
    FrFr,
    #[strum(serialize = "es-ES")]
    EsEs,
    #[strum(serialize = "it-IT")]
    ItIt,
    #[strum(serialize = "pt-BR")]
    PtBr,
    #[strum(serialize = "nl-NL")]
    NlNl,
}

impl NumberLocale {
    fn group_separator(self) -> &'static str {
        match self {
            Self::EnUs | Self::EnGb => ",",
            Self::DeCh => "\u{2019}",
            Self::FrFr => "\u{202f}",
            Self::DeDe | Self::EsEs | Self::ItIt | Self::PtBr | Self::NlNl => ".",
        }
    }

    fn decimal_separator(self) -> &'static str {
        match self {
            Self::EnUs | Self::EnGb | Self::DeCh => ".",
            Self::DeDe | Self::FrFr | Self::EsEs | Self::ItIt | Self::PtBr | Self::NlNl => ",",
        }
    }

    /// Spanish leaves four-digit numbers ungrouped.
    fn min_grouping_digits(self) -> usize {
        match self {
            Self::EsEs => 2,
            _ => 1,
        }
    }
}

/// Formats numbers with a locale's separators and a fraction-digit cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormatter {
    locale: NumberLocale,
    max_fraction_digits: usize,
}

impl Default for NumberFormatter {
    fn default() -> Self {
        Self::new(NumberLocale::default(), 3)
    }
}

impl NumberFormatter {
    pub fn new(locale: NumberLocale, max_fraction_digits: usize) -> Self {
        Self {
            locale,
            max_fraction_digits,
        }
    }

    pub fn locale(&self) -> NumberLocale {
        self.locale
    }

    /// Format a float, rounding to at most `max_fraction_digits` decimals.
    pub fn format(&self, n: f64) -> String {
        if n.is_nan() {
            return "NaN".to_string();
        }
        if n.is_infinite() {
            return if n > 0.0 { "∞" } else { "-∞" }.to_string();
        }

        let rounded = format!("{:.*}", self.max_fraction_digits, n.abs());
        let (int_part, frac_part) = match rounded.split_once('.') {
            Some((int_part, frac)) => (int_part, frac.trim_end_matches('0')),
            None => (rounded.as_str(), ""),
        };

        let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
        self.assemble(n < 0.0 && !is_zero, int_part, frac_part)
    }

    pub fn format_i64(&self, n: i64) -> String {
        self.assemble(n < 0, &n.unsigned_abs().to_string(), "")
    }

    /// Format a JSON number; other values yield `None`.
    pub fn format_value(&self, value: &Value) -> Option<String> {
        let Value::Number(n) = value else {
            return None;
        };
        if let Some(i) = n.as_i64() {
            return Some(self.format_i64(i));
        }
        if let Some(u) = n.as_u64() {
            return Some(self.assemble(false, &u.to_string(), ""));
        }
        n.as_f64().map(|f| self.format(f))
    }

    fn assemble(&self, negative: bool, int_digits: &str, frac_digits: &str) -> String {
        let mut out = String::with_capacity(int_digits.len() + frac_digits.len() + 8);
        if negative {
            out.push('-');
        }
        out.push_str(&self.group(int_digits));
        if !frac_digits.is_empty() {
            out.push_str(self.locale.decimal_separator());
            out.push_str(frac_digits);
        }
        out
    }

    fn group(&self, digits: &str) -> String {
        let len = digits.len();
        if len < 3 + self.locale.min_grouping_digits() {
            return digits.to_string();
        }

        let separator = self.locale.group_separator();
        let mut grouped = String::with_capacity(len + len / 3 * separator.len());
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                grouped.push_str(separator);
            }
            grouped.push(c);
        }
        grouped
    }
}
