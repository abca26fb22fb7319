// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain string forms of JSON values.

use serde_json::{Number, Value};

/// The string a value contributes to a template or a text cell.
///
/// Strings are used as-is, `null` becomes empty, arrays join their elements
/// with `,`, and objects render as compact JSON.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Numbers without a trailing `.0` for whole floats.
pub fn number_string(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => format!("{f}"),
        None => n.to_string(),
    }
}

/// Numeric view of a value: numbers, and strings that parse as numbers.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars() {
        assert_eq!(display_string(&json!("hi")), "hi");
        assert_eq!(display_string(&json!(null)), "");
        assert_eq!(display_string(&json!(true)), "true");
        assert_eq!(display_string(&json!(23141)), "23141");
        assert_eq!(display_string(&json!(3.0)), "3");
        assert_eq!(display_string(&json!(2.5)), "2.5");
    }

    #[test]
    fn containers() {
        assert_eq!(display_string(&json!([1, "a", null])), "1,a,");
        assert_eq!(display_string(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn numeric_strings_are_numbers() {
        assert_eq!(as_number(&json!("12.5")), Some(12.5));
        assert_eq!(as_number(&json!(" 7 ")), Some(7.0));
        assert_eq!(as_number(&json!("seven")), None);
        assert_eq!(as_number(&json!(true)), None);
    }
}
