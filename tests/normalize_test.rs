//! Pipeline behaviour across both built-in envelopes
//!
//! Covers path fallback, empty payloads, no-match diagnostics, debug
//! stripping and third-party handlers registered after the built-ins.

use serde_json::{Value, json};
use std::sync::Arc;

use pagefeed::handlers::{FormatHandler, HandlerOutcome, HandlerRegistry};
use pagefeed::normalize::{
    NormalizeOptions, NormalizeOutput, NormalizedResult, ResultCode, messages, normalize,
    normalize_with, resolve,
};

fn run(payload: &Value, options: &NormalizeOptions) -> NormalizedResult {
    normalize(Some(payload), options)
        .into_normalized()
        .expect("data path given, result must be normalized")
}

#[test]
fn test_tiered_success_extracts_path() {
    let payload = json!({
        "ReturnInfo": {"Code": 1, "Description": ""},
        "BusinessInfo": {"Code": 1, "Description": ""},
        "UserArea": {"InfoList": [{"title": "a"}, {"title": "b"}]}
    });

    let result = run(&payload, &NormalizeOptions::with_path("UserArea.InfoList"));

    assert_eq!(result.code, ResultCode::Success);
    assert_eq!(result.data, Some(json!([{"title": "a"}, {"title": "b"}])));
    assert!(result.message.is_empty());
    assert!(result.debug_info.is_none());
}

#[test]
fn test_tiered_business_failure_surfaces_description() {
    let payload = json!({
        "ReturnInfo": {"Code": 1},
        "BusinessInfo": {"Code": 0, "Description": "session expired"}
    });
    let result = run(&payload, &NormalizeOptions::with_path("UserArea.InfoList"));
    assert_eq!(result.code, ResultCode::Failure);
    assert_eq!(result.message, "session expired");
    assert!(result.data.is_none());

    let payload = json!({"ReturnInfo": {"Code": 1}, "BusinessInfo": {"Code": 0}});
    let result = run(&payload, &NormalizeOptions::with_path("UserArea.InfoList"));
    assert_eq!(result.message, messages::BUSINESS_ERROR);
}

#[test]
fn test_status_envelope_success_codes() {
    for code in [json!(1), json!(200), json!("200")] {
        let payload = json!({"status": {"code": code}, "custom": {"infoList": [1]}});
        let result = run(&payload, &NormalizeOptions::with_path("custom.infoList"));
        assert_eq!(result.code, ResultCode::Success);
        assert_eq!(result.data, Some(json!([1])));
        assert_eq!(result.overlay("status"), Some(&code));
    }
}

#[test]
fn test_status_envelope_401_without_text() {
    let payload = json!({"status": {"code": 401}, "custom": {}});
    let result = run(&payload, &NormalizeOptions::with_path("custom.infoList"));
    assert_eq!(result.code, ResultCode::Failure);
    assert_eq!(result.message, messages::INVALID_PARAMETERS);
}

#[test]
fn test_path_resolution_examples() {
    let nested = json!({"a": {"b": {"c": 5}}});
    assert_eq!(resolve(Some(&nested), "a.b.c"), Some(&json!(5)));
    assert_eq!(resolve(Some(&json!({"a": {}})), "a.b.c"), None);
    assert_eq!(resolve(None, "a.b"), None);
}

#[test]
fn test_missing_first_path_falls_back_to_later_path() {
    let payload = json!({
        "ReturnInfo": {"Code": 1},
        "BusinessInfo": {"Code": 1},
        "a": {"b": {"c": 5}}
    });
    let options = NormalizeOptions::with_path(["x.y", "a.b.c"]).debug(true);

    let result = run(&payload, &options);

    assert_eq!(result.code, ResultCode::Success);
    assert_eq!(result.data, Some(json!(5)));
    assert!(result.message.is_empty());
    assert_eq!(result.debug_info.unwrap().kind, "tiered envelope: a.b.c");
}

#[test]
fn test_every_path_missing_reports_path_not_found() {
    let payload = json!({"ReturnInfo": {"Code": 1}, "BusinessInfo": {"Code": 1}});
    let options = NormalizeOptions::with_path(["x.y", "z"]).debug(true);

    let result = run(&payload, &options);

    assert_eq!(result.code, ResultCode::Success);
    assert!(result.data.is_none());
    assert_eq!(result.message, messages::PATH_NOT_FOUND);
    assert_eq!(result.debug_info.unwrap().kind, "tiered envelope: z");
}

#[test]
fn test_default_list_paths_match_lowercase_variant() {
    let payload = json!({"status": {"code": 200}, "custom": {"infolist": [{"id": 1}]}});
    let options =
        NormalizeOptions::with_path(["custom.infoList", "custom.infolist", "UserArea.InfoList"]);

    let result = run(&payload, &options);
    assert_eq!(result.code, ResultCode::Success);
    assert_eq!(result.data, Some(json!([{"id": 1}])));
}

#[test]
fn test_debug_flag_only_toggles_debug_info() {
    let payload = json!({"status": {"code": 200, "text": "ok"}, "custom": {"infoList": [1, 2]}});
    let plain = run(&payload, &NormalizeOptions::with_path("custom.infoList"));
    let debug = run(&payload, &NormalizeOptions::with_path("custom.infoList").debug(true));

    assert!(plain.debug_info.is_none());
    assert_eq!(
        debug.debug_info.as_ref().map(|d| d.kind.as_str()),
        Some("status envelope: custom.infoList")
    );
    assert_eq!(
        NormalizedResult {
            debug_info: None,
            ..debug
        },
        plain
    );
}

#[test]
fn test_empty_payloads_fail_regardless_of_path() {
    for payload in [Value::Null, json!(""), json!(0), json!(false)] {
        for options in [
            NormalizeOptions::with_path("custom.infoList"),
            NormalizeOptions::with_path(["a", "b"]).debug(true),
        ] {
            let result = run(&payload, &options);
            assert_eq!(result.code, ResultCode::Failure);
            assert_eq!(result.message, messages::EMPTY_PAYLOAD);
            assert!(result.data.is_none());
        }
    }

    let absent = normalize(None, &NormalizeOptions::with_path("a"))
        .into_normalized()
        .unwrap();
    assert_eq!(absent.message, messages::EMPTY_PAYLOAD);
}

#[test]
fn test_unknown_shape_is_no_match_with_payload_echo() {
    let payload = json!({"result": "ok", "items": [1, 2, 3]});

    let result = run(&payload, &NormalizeOptions::with_path(["items", "result"]).debug(true));
    assert_eq!(result.code, ResultCode::Failure);
    assert_eq!(result.message, messages::NO_MATCH);
    assert!(result.data.is_none());
    let info = result.debug_info.unwrap();
    assert_eq!(info.kind, messages::UNKNOWN_FORMAT);
    assert_eq!(info.data, Some(payload.clone()));

    let quiet = run(&payload, &NormalizeOptions::with_path("items"));
    assert_eq!(quiet.message, messages::NO_MATCH);
    assert!(quiet.debug_info.is_none());
}

#[test]
fn test_passthrough_returns_payload_verbatim() {
    let payload = json!({"status": {"code": 200}, "custom": {"infoList": [1]}});
    let out = normalize(Some(&payload), &NormalizeOptions::default());
    assert_eq!(out.to_json(), payload);
    assert!(matches!(out, NormalizeOutput::Passthrough(Some(_))));
}

#[test]
fn test_payload_is_not_modified() {
    let payload = json!({"status": {"code": 500}, "custom": {"x": 1}});
    let before = payload.clone();
    let first = run(&payload, &NormalizeOptions::with_path("custom.x"));
    let second = run(&payload, &NormalizeOptions::with_path("custom.x"));
    assert_eq!(payload, before);
    assert_eq!(first, second);
}

/// `{"ok": true, "rows": [...]}` envelope used by a newer backend
struct FlatHandler;

impl FormatHandler for FlatHandler {
    fn name(&self) -> &'static str {
        "flat envelope"
    }

    fn try_handle(&self, payload: &Value, path: &str, acc: &mut NormalizedResult) -> HandlerOutcome {
        let Some(ok) = payload.get("ok").and_then(Value::as_bool) else {
            return HandlerOutcome::Declined;
        };

        acc.code = if ok { ResultCode::Success } else { ResultCode::Failure };
        acc.data = resolve(Some(payload), path).cloned();
        acc.message = if acc.data.is_some() {
            String::new()
        } else {
            messages::PATH_NOT_FOUND.to_string()
        };
        acc.set_debug_kind(format!("flat envelope: {path}"));
        HandlerOutcome::Committed
    }
}

#[test]
fn test_registered_plugin_handles_new_envelope() {
    let mut registry = HandlerRegistry::with_defaults();
    registry.register(Arc::new(FlatHandler));

    let payload = json!({"ok": true, "rows": [{"id": 1}]});
    let result = normalize_with(&registry, Some(&payload), &NormalizeOptions::with_path("rows"))
        .into_normalized()
        .unwrap();
    assert_eq!(result.code, ResultCode::Success);
    assert_eq!(result.data, Some(json!([{"id": 1}])));

    // Built-ins are consulted first and the plugin never sees their shapes
    let payload = json!({"status": {"code": 200}, "custom": {"rows": [2]}, "ok": false});
    let result = normalize_with(&registry, Some(&payload), &NormalizeOptions::with_path("custom.rows"))
        .into_normalized()
        .unwrap();
    assert_eq!(result.code, ResultCode::Success);
    assert_eq!(result.data, Some(json!([2])));
}

#[test]
fn test_plugin_failure_with_data_holds_until_last_path() {
    let mut registry = HandlerRegistry::new();
    registry.register(Arc::new(FlatHandler));

    let payload = json!({"ok": false, "rows": [1], "more": [2]});
    let options = NormalizeOptions::with_path(["rows", "more"]);
    let result = normalize_with(&registry, Some(&payload), &options)
        .into_normalized()
        .unwrap();

    assert_eq!(result.code, ResultCode::Failure);
    assert_eq!(result.data, Some(json!([2])));
}

#[test]
fn test_result_serializes_to_wire_shape() {
    let payload = json!({"status": {"code": "200", "text": "ok"}, "custom": {"infoList": []}});
    let out = normalize(Some(&payload), &NormalizeOptions::with_path("custom.infoList"));

    assert_eq!(
        out.to_json(),
        json!({"code": 1, "message": "ok", "data": [], "status": "200"})
    );
}

#[test]
fn test_status_without_code_omits_status_field() {
    let payload = json!({"status": {"text": "x"}, "custom": {"a": 1}});
    let out = normalize(Some(&payload), &NormalizeOptions::with_path("custom.a"));

    assert_eq!(
        out.to_json(),
        json!({"code": 0, "message": "x", "data": null})
    );
}
