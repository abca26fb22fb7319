// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge with fuzzy match suggestions.
//!
//! Converts Figment deserialization errors and catalog problems into miette
//! diagnostics with source spans, valid key listings, and "did you mean?"
//! suggestions using Jaro-Winkler string similarity.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with rich diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// An unknown key was found in the configuration.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(dashwire::config::unknown_key),
        help("{}", format_unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        /// Suggested correction via fuzzy matching, if any.
        suggestion: Option<String>,
        /// Comma-separated valid keys for the section.
        valid_keys: String,
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A configuration value has the wrong type.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(dashwire::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
        #[label("wrong type here")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A required configuration key is missing.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(dashwire::config::missing_key),
        help("add `{key} = <value>` to your dashwire.toml")
    )]
    MissingKey { key: String },

    /// A validation error for a config value.
    #[error("validation error: {message}")]
    #[diagnostic(code(dashwire::config::validation))]
    Validation { message: String },

    /// A catalog widget failed validation and was disabled.
    #[error("widget `{widget_id}` is disabled: {message}")]
    #[diagnostic(
        code(dashwire::catalog::invalid_widget),
        severity(Warning),
        help("the widget renders a configuration error until its definition is fixed")
    )]
    InvalidWidget { widget_id: String, message: String },

    /// A dashboard references a widget id the catalog does not define.
    #[error("dashboard `{dashboard_id}` references unknown widget `{widget_id}`")]
    #[diagnostic(
        code(dashwire::catalog::unknown_reference),
        severity(Warning),
        help("{}", format_reference_help(suggestion.as_deref()))
    )]
    UnknownReference {
        dashboard_id: String,
        widget_id: String,
        suggestion: Option<String>,
    },

    /// The catalog cannot be used at all.
    #[error("invalid catalog: {message}")]
    #[diagnostic(code(dashwire::catalog::invalid))]
    Catalog {
        message: String,
        #[label("here")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// Catch-all for other configuration errors.
    #[error("configuration error: {0}")]
    #[diagnostic(code(dashwire::config::other))]
    Other(String),
}

impl ConfigError {
    /// Warnings leave the catalog usable; everything else is fatal.
    pub fn is_warning(&self) -> bool {
        matches!(self.severity(), Some(miette::Severity::Warning))
    }
}

fn format_unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

fn format_reference_help(suggestion: Option<&str>) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? The reference is skipped when rendering"),
        None => "the reference is skipped when rendering".to_string(),
    }
}

/// Convert a `figment::Error` into a list of `ConfigError` diagnostics.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    let mut errors = Vec::new();

    for error in err {
        let config_error = match &error.kind {
            Kind::UnknownField(field, expected) => {
                let valid_keys: Vec<&str> = expected.to_vec();
                let suggestion = suggest_key(field, &valid_keys);
                let (span, src) = find_source_span(&error, field, toml_sources);

                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion,
                    valid_keys: valid_keys.join(", "),
                    span,
                    src,
                }
            }
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: field.clone().into_owned(),
            },
            Kind::InvalidType(actual, expected) => {
                // figment puts the offending key last in the path.
                let (span, src) = match error.path.split_last() {
                    Some((field, _)) => find_source_span(&error, field, toml_sources),
                    None => (None, None),
                };
                ConfigError::InvalidType {
                    key: error.path.join("."),
                    detail: format!("found {actual}, expected {expected}"),
                    expected: expected.to_string(),
                    span,
                    src,
                }
            }
            _ => ConfigError::Other(format!("{error}")),
        };

        errors.push(config_error);
    }

    errors
}

/// Find the source span for an error in the TOML source files.
fn find_source_span(
    error: &figment::error::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let source_path = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    // Inline strings carry no file path; a lone source is the only candidate.
    let source = source_path
        .and_then(|path| toml_sources.iter().find(|(p, _)| *p == path))
        .or_else(|| match toml_sources {
            [only] => Some(only),
            _ => None,
        });

    if let Some((path, content)) = source {
        let section = error
            .path
            .iter()
            .take_while(|segment| segment.as_str() != field);
        let section: Vec<String> = section.cloned().collect();

        if let Some(offset) = find_key_offset(content, &section, field) {
            let span = SourceSpan::new(offset.into(), field.len());
            let named = NamedSource::new(path, content.to_string());
            return (Some(span), Some(named));
        }
    }

    (None, None)
}

/// Find the byte offset of a key in TOML content, relative to a section path.
///
/// For `path = ["render"]` and `field = "page_szie"`, finds the `[render]`
/// header then searches for `page_szie` after it. Top-level fields are
/// searched from the start.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let search_start = match path.first() {
        None => 0,
        Some(section) => {
            let header = format!("[{section}]");
            content.find(&header).map(|pos| pos + header.len())?
        }
    };

    let remaining = &content[search_start..];

    let mut byte_offset = 0;
    for line in remaining.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(after) = trimmed.strip_prefix(field) {
            if after.starts_with([' ', '=', '\t']) {
                let field_start_in_line = line.len() - trimmed.len();
                return Some(search_start + byte_offset + field_start_in_line);
            }
        }
        byte_offset += line.len();
    }

    None
}

/// Suggest a similar key using Jaro-Winkler similarity.
///
/// Returns the best match above the threshold, or `None` if nothing is close.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    let mut best_score = SUGGESTION_THRESHOLD;
    let mut best_match = None;

    for &key in valid_keys {
        let score = strsim::jaro_winkler(unknown, key);
        if score > best_score {
            best_score = score;
            best_match = Some(key.to_string());
        }
    }

    best_match
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        let diagnostic: &dyn Diagnostic = error;
        if handler.render_report(&mut buf, diagnostic).is_ok() {
            eprint!("{buf}");
        } else {
            eprintln!("Error: {error}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_page_size_for_typo() {
        let valid = &["page_size", "locale", "max_fraction_digits"];
        assert_eq!(
            suggest_key("page_szie", valid),
            Some("page_size".to_string())
        );
    }

    #[test]
    fn suggest_widget_id_for_typo() {
        let valid = &["orders-table", "revenue-card"];
        assert_eq!(
            suggest_key("orders-tabel", valid),
            Some("orders-table".to_string())
        );
    }

    #[test]
    fn no_suggestion_for_distant_typo() {
        let valid = &["name", "log_level"];
        assert_eq!(suggest_key("zzzzzz", valid), None);
    }

    #[test]
    fn find_key_offset_in_section() {
        let content = "[engine]\nname = \"x\"\n\n[render]\nlocael = \"de-DE\"\n";
        let path = vec!["render".to_string()];
        let o = find_key_offset(content, &path, "locael").unwrap();
        assert_eq!(&content[o..o + 6], "locael");
    }

    #[test]
    fn find_key_offset_handles_crlf() {
        let content = "[cache]\r\nttl = 5\r\n";
        let path = vec!["cache".to_string()];
        let o = find_key_offset(content, &path, "ttl").unwrap();
        assert_eq!(&content[o..o + 3], "ttl");
    }

    #[test]
    fn catalog_warnings_are_not_fatal() {
        let warning = ConfigError::UnknownReference {
            dashboard_id: "main".into(),
            widget_id: "ghost".into(),
            suggestion: None,
        };
        assert!(warning.is_warning());
        assert!(!ConfigError::Validation { message: "x".into() }.is_warning());
    }
}
