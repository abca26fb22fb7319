// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `{{identifier}}` substitution against a flat record.
//!
//! Identifiers are ASCII word characters and index only the top level of
//! the context, so `{{a.b}}` and `{{größe}}` are left untouched.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

use crate::display::display_string;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("placeholder pattern is valid"));

/// Replace every `{{identifier}}` in `template` with the matching top-level
/// field of `context`. Missing fields, `null`, and non-object contexts all
/// substitute the empty string.
pub fn substitute(template: &str, context: &Value) -> String {
    let record = context.as_object();
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            record
                .and_then(|r| r.get(&caps[1]))
                .map(display_string)
                .unwrap_or_default()
        })
        .into_owned()
}

/// Identifiers referenced by a template, in order of appearance.
pub fn placeholders(template: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}
