// SPDX-FileCopyrightText: 2026 Dashwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Restricted dot-path lookup into JSON values.
//!
//! Supports `a.b.c` with an optional `$.` prefix. There are no array
//! indices, filters, or wildcards: callers that need array elements resolve
//! the whole array and iterate it themselves.

use serde_json::Value;

/// Strip the optional leading `$` and `.` from a path expression.
pub fn normalize(path: &str) -> &str {
    let path = path.strip_prefix('$').unwrap_or(path);
    path.strip_prefix('.').unwrap_or(path)
}

/// Resolve `path` against `value`.
///
/// An absent or empty path returns `value` itself. A missing key, or a
/// non-object anywhere along the way, yields `None`. Never panics.
pub fn resolve<'a>(value: &'a Value, path: Option<&str>) -> Option<&'a Value> {
    let path = match path.map(normalize) {
        None | Some("") => return Some(value),
        Some(p) => p,
    };

    path.split('.')
        .try_fold(value, |current, segment| current.as_object()?.get(segment))
}

/// Like [`resolve`], but treats JSON `null` as absent.
pub fn resolve_present<'a>(value: &'a Value, path: Option<&str>) -> Option<&'a Value> {
    resolve(value, path).filter(|v| !v.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn absent_and_empty_paths_are_identity() {
        let obj = json!({"a": {"b": 5}});
        assert_eq!(resolve(&obj, None), Some(&obj));
        assert_eq!(resolve(&obj, Some("")), Some(&obj));
        assert_eq!(resolve(&obj, Some("$")), Some(&obj));
        assert_eq!(resolve(&obj, Some("$.")), Some(&obj));
    }

    #[test]
    fn prefix_is_optional() {
        let obj = json!({"a": {"b": 5}});
        assert_eq!(resolve(&obj, Some("$.a.b")), Some(&json!(5)));
        assert_eq!(resolve(&obj, Some("a.b")), Some(&json!(5)));
        assert_eq!(resolve(&obj, Some(".a.b")), Some(&json!(5)));
    }

    #[test]
    fn missing_keys_short_circuit() {
        let obj = json!({"a": {"b": 5}});
        assert_eq!(resolve(&obj, Some("a.c")), None);
        assert_eq!(resolve(&obj, Some("a.b.c")), None);
        assert_eq!(resolve(&obj, Some("x.y.z")), None);
    }

    #[test]
    fn null_root_never_panics() {
        assert_eq!(resolve(&Value::Null, Some("a.b")), None);
        assert_eq!(resolve(&json!(42), Some("a")), None);
    }

    #[test]
    fn arrays_are_not_indexed() {
        let obj = json!({"items": [{"id": 1}]});
        assert_eq!(resolve(&obj, Some("items.0")), None);
        assert_eq!(resolve(&obj, Some("items[0]")), None);
        assert_eq!(resolve(&obj, Some("items")), Some(&json!([{"id": 1}])));
    }

    #[test]
    fn explicit_null_is_found_but_not_present() {
        let obj = json!({"a": null});
        assert_eq!(resolve(&obj, Some("a")), Some(&Value::Null));
        assert_eq!(resolve_present(&obj, Some("a")), None);
        assert_eq!(resolve(&obj, Some("a.b")), None);
    }

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            "[a-z]{0,8}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,4}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn identity_for_any_value(value in arb_json()) {
            prop_assert_eq!(resolve(&value, None), Some(&value));
            prop_assert_eq!(resolve(&value, Some("")), Some(&value));
        }

        #[test]
        fn single_segment_matches_direct_lookup(value in arb_json(), key in "[a-z]{1,4}") {
            let expected = value.as_object().and_then(|m| m.get(&key));
            prop_assert_eq!(resolve(&value, Some(&key)), expected);
        }
    }
}
