//! Response normalization pipeline
//!
//! Turns heterogeneous backend envelopes into one [`NormalizedResult`]:
//!
//! 1. No data path requested: the payload is handed back untouched
//! 2. Empty payload (`null`, `""`, `0`, `false`): failure, no search
//! 3. For each candidate path (outer) and each registered handler (inner),
//!    let the handler try the payload
//! 4. First result with data that is a success (or sits on the last path)
//!    wins and stops the search
//! 5. Otherwise the latest committed result without data is returned, or a
//!    no-match failure when no handler ever recognised the payload
//!
//! Debug info is stripped unless `is_debug` is set.
//!
//! # Usage
//!
//! ```
//! use pagefeed::normalize::{NormalizeOptions, ResultCode, normalize};
//! use serde_json::json;
//!
//! let payload = json!({"status": {"code": 200}, "custom": {"infoList": [1, 2]}});
//! let out = normalize(Some(&payload), &NormalizeOptions::with_path("custom.infoList"));
//! let result = out.into_normalized().unwrap();
//! assert_eq!(result.code, ResultCode::Success);
//! assert_eq!(result.data, Some(json!([1, 2])));
//! ```

pub mod messages;
mod path;
mod types;

pub use path::resolve;
pub use types::{DataPath, DebugInfo, NormalizeOptions, NormalizeOutput, NormalizedResult, ResultCode};

use serde_json::Value;
use tracing::debug;

use crate::handlers::{self, HandlerOutcome, HandlerRegistry};
use crate::numeric::is_truthy;

/// Normalize against the process-wide handler registry
pub fn normalize(payload: Option<&Value>, options: &NormalizeOptions) -> NormalizeOutput {
    normalize_with(handlers::global(), payload, options)
}

/// Normalize against an explicit registry
pub fn normalize_with(
    registry: &HandlerRegistry,
    payload: Option<&Value>,
    options: &NormalizeOptions,
) -> NormalizeOutput {
    let Some(data_path) = options.data_path.clone() else {
        return NormalizeOutput::Passthrough(payload.cloned());
    };
    let paths = data_path.into_paths();

    let mut result = match payload.filter(|p| is_truthy(p)) {
        None => NormalizedResult::failure(messages::EMPTY_PAYLOAD),
        Some(payload) => search(registry, payload, &paths),
    };

    if !options.is_debug {
        result.debug_info = None;
    }

    NormalizeOutput::Normalized(result)
}

fn search(registry: &HandlerRegistry, payload: &Value, paths: &[String]) -> NormalizedResult {
    let last = paths.len().saturating_sub(1);
    // Latest-path committed result that carried no data
    let mut fallback: Option<(usize, NormalizedResult)> = None;

    for (index, path) in paths.iter().enumerate() {
        for handler in registry.iter() {
            let mut acc = NormalizedResult::seed();
            if handler.try_handle(payload, path, &mut acc) == HandlerOutcome::Declined {
                continue;
            }

            if acc.has_data() && (acc.code.is_success() || index == last) {
                debug!(handler = handler.name(), path = %path, code = ?acc.code, "Result accepted");
                return acc;
            }

            debug!(
                handler = handler.name(),
                path = %path,
                code = ?acc.code,
                has_data = acc.has_data(),
                "Result committed but not accepted, continuing"
            );
            if fallback.as_ref().is_none_or(|(seen, _)| *seen < index) {
                fallback = Some((index, acc));
            }
        }
    }

    match fallback {
        Some((_, committed)) => committed,
        None => {
            debug!(paths = paths.len(), handlers = registry.len(), "No handler matched payload");
            let mut result = NormalizedResult::failure(messages::NO_MATCH);
            if let Some(info) = result.debug_info.as_mut() {
                info.data = Some(payload.clone());
            }
            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::FormatHandler;
    use serde_json::json;
    use std::sync::Arc;

    /// Commits a fixed failure carrying data for any payload with `raw`
    struct RawHandler;

    impl FormatHandler for RawHandler {
        fn name(&self) -> &'static str {
            "raw"
        }

        fn try_handle(&self, payload: &Value, path: &str, acc: &mut NormalizedResult) -> HandlerOutcome {
            let Some(raw) = payload.get("raw") else {
                return HandlerOutcome::Declined;
            };
            acc.code = ResultCode::Failure;
            acc.message = format!("raw at {path}");
            acc.data = Some(raw.clone());
            acc.set_debug_kind(format!("raw: {path}"));
            HandlerOutcome::Committed
        }
    }

    fn raw_registry() -> HandlerRegistry {
        let mut registry = HandlerRegistry::with_defaults();
        registry.register(Arc::new(RawHandler));
        registry
    }

    #[test]
    fn test_passthrough_without_data_path() {
        let payload = json!({"anything": true});
        let out = normalize(Some(&payload), &NormalizeOptions::default());
        assert_eq!(out, NormalizeOutput::Passthrough(Some(payload)));
    }

    #[test]
    fn test_passthrough_keeps_absent_payload() {
        let out = normalize(None, &NormalizeOptions::default());
        assert_eq!(out, NormalizeOutput::Passthrough(None));
    }

    #[test]
    fn test_failure_with_data_accepted_only_on_last_path() {
        let registry = raw_registry();
        let payload = json!({"raw": [1]});
        let options = NormalizeOptions::with_path(["first", "second"]).debug(true);

        let result = normalize_with(&registry, Some(&payload), &options)
            .into_normalized()
            .unwrap();
        assert_eq!(result.code, ResultCode::Failure);
        assert_eq!(result.message, "raw at second");
        assert_eq!(result.data, Some(json!([1])));
        assert_eq!(result.debug_info.unwrap().kind, "raw: second");
    }

    #[test]
    fn test_empty_path_list_is_no_match() {
        let payload = json!({"status": {"code": 200}, "custom": {"a": 1}});
        let options = NormalizeOptions::with_path(Vec::<String>::new());
        let result = normalize(Some(&payload), &options).into_normalized().unwrap();
        assert_eq!(result.code, ResultCode::Failure);
        assert_eq!(result.message, messages::NO_MATCH);
    }

    #[test]
    fn test_empty_registry_is_no_match() {
        let payload = json!({"status": {"code": 200}, "custom": {"a": 1}});
        let options = NormalizeOptions::with_path("custom.a").debug(true);
        let result = normalize_with(&HandlerRegistry::new(), Some(&payload), &options)
            .into_normalized()
            .unwrap();
        assert_eq!(result.message, messages::NO_MATCH);
        assert_eq!(result.debug_info.unwrap().data, Some(payload));
    }

    #[test]
    fn test_first_handler_on_path_is_kept_as_fallback() {
        // Both built-ins match this hybrid payload; tiered comes first.
        let payload = json!({
            "ReturnInfo": {"Code": 1, "Description": "tier"},
            "BusinessInfo": {"Code": 0, "Description": "business says no"},
            "status": {"code": 500},
            "custom": {"x": 1}
        });
        let options = NormalizeOptions::with_path("custom.missing");
        let result = normalize(Some(&payload), &options).into_normalized().unwrap();
        assert_eq!(result.message, "business says no");
        assert!(result.overlay.is_empty());
    }
}
