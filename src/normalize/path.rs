use serde_json::Value;

/// Resolve a dotted path (`custom.infoList`, `rows.0.id`) against a JSON tree.
///
/// Object nodes are keyed by segment; array nodes accept a numeric segment as
/// an index. Walking into a scalar, a missing key or `null` yields `None`.
/// An empty path resolves to nothing.
pub fn resolve<'a>(root: Option<&'a Value>, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }

    path.split('.').try_fold(root?, |node, segment| match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
    .filter(|value| !value.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_nested() {
        let root = json!({"a": {"b": {"c": 5}}});
        assert_eq!(resolve(Some(&root), "a.b.c"), Some(&json!(5)));
        assert_eq!(resolve(Some(&root), "a.b"), Some(&json!({"c": 5})));
    }

    #[test]
    fn test_resolve_missing_segment() {
        let root = json!({"a": {}});
        assert_eq!(resolve(Some(&root), "a.b.c"), None);
    }

    #[test]
    fn test_resolve_absent_root() {
        assert_eq!(resolve(None, "a.b"), None);
        assert_eq!(resolve(Some(&Value::Null), "a.b"), None);
    }

    #[test]
    fn test_resolve_empty_path() {
        let root = json!({"": 1});
        assert_eq!(resolve(Some(&root), ""), None);
    }

    #[test]
    fn test_resolve_array_index() {
        let root = json!({"rows": [{"id": 7}, {"id": 8}]});
        assert_eq!(resolve(Some(&root), "rows.1.id"), Some(&json!(8)));
        assert_eq!(resolve(Some(&root), "rows.5.id"), None);
        assert_eq!(resolve(Some(&root), "rows.first"), None);
    }

    #[test]
    fn test_resolve_through_scalar() {
        let root = json!({"a": "text"});
        assert_eq!(resolve(Some(&root), "a.length"), None);
    }

    #[test]
    fn test_resolve_null_leaf_is_absent() {
        let root = json!({"a": {"b": null}});
        assert_eq!(resolve(Some(&root), "a.b"), None);
    }

    #[test]
    fn test_resolve_falsy_leaves_are_present() {
        let root = json!({"zero": 0, "empty": "", "list": []});
        assert_eq!(resolve(Some(&root), "zero"), Some(&json!(0)));
        assert_eq!(resolve(Some(&root), "empty"), Some(&json!("")));
        assert_eq!(resolve(Some(&root), "list"), Some(&json!([])));
    }
}
