//! Loose numeric coercion for backend status codes
//!
//! Backends disagree on whether status codes travel as numbers or strings
//! (`1`, `"1"`, `" 200 "`). Everything is coerced to `f64` before comparison;
//! values that cannot be read as a number simply never match.

use serde_json::Value;

/// Coerce a JSON value into a number.
///
/// - numbers map to themselves
/// - strings are trimmed; an empty string is `0`, anything else must parse
/// - booleans map to `0` / `1`, `null` maps to `0`
/// - arrays and objects are not numeric
pub fn coerce(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
            }
        }
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Coerce an optional field; a missing field is never numeric.
pub fn coerce_field(value: Option<&Value>) -> Option<f64> {
    value.and_then(coerce)
}

/// True when `value` coerces to one of `sentinels`.
pub fn matches_any(value: Option<&Value>, sentinels: &[f64]) -> bool {
    coerce_field(value).is_some_and(|n| sentinels.iter().any(|s| *s == n))
}

/// JavaScript-style truthiness, used for envelope shape checks and the
/// empty-payload test.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Textual form of a description field, when it carries any text.
pub fn text_of(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_numbers_and_strings() {
        assert_eq!(coerce(&json!(1)), Some(1.0));
        assert_eq!(coerce(&json!(200.0)), Some(200.0));
        assert_eq!(coerce(&json!("1")), Some(1.0));
        assert_eq!(coerce(&json!(" 200 ")), Some(200.0));
        assert_eq!(coerce(&json!("")), Some(0.0));
    }

    #[test]
    fn test_coerce_non_numeric() {
        assert_eq!(coerce(&json!("ok")), None);
        assert_eq!(coerce(&json!("NaN")), None);
        assert_eq!(coerce(&json!([1])), None);
        assert_eq!(coerce(&json!({"code": 1})), None);
        assert_eq!(coerce_field(None), None);
    }

    #[test]
    fn test_coerce_bool_and_null() {
        assert_eq!(coerce(&json!(true)), Some(1.0));
        assert_eq!(coerce(&json!(false)), Some(0.0));
        assert_eq!(coerce(&Value::Null), Some(0.0));
    }

    #[test]
    fn test_matches_any() {
        assert!(matches_any(Some(&json!("200")), &[1.0, 200.0]));
        assert!(matches_any(Some(&json!(1)), &[1.0, 200.0]));
        assert!(!matches_any(Some(&json!(401)), &[1.0, 200.0]));
        assert!(!matches_any(Some(&json!("abc")), &[1.0]));
        assert!(!matches_any(None, &[1.0]));
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!("0")));
    }

    #[test]
    fn test_text_of() {
        assert_eq!(text_of(Some(&json!("boom"))), Some("boom".to_string()));
        assert_eq!(text_of(Some(&json!(""))), None);
        assert_eq!(text_of(Some(&json!(42))), Some("42".to_string()));
        assert_eq!(text_of(Some(&Value::Null)), None);
        assert_eq!(text_of(None), None);
    }
}
