use serde_json::Value;
use tracing::debug;

use super::traits::{FormatHandler, HandlerOutcome};
use crate::normalize::{NormalizedResult, ResultCode, messages, resolve};
use crate::numeric::{coerce_field, is_truthy, matches_any, text_of};

const STATUS_SUCCESS: f64 = 1.0;
const STATUS_SUCCESS_HTTP: f64 = 200.0;

const ERROR_TEXTS: [(f64, &str); 4] = [
    (401.0, messages::INVALID_PARAMETERS),
    (402.0, messages::AUTH_FAILED),
    (500.0, messages::SERVER_ERROR),
    (300.0, messages::BUSINESS_FAILURE),
];

/// Single-status envelope with a `custom` payload object.
///
/// ```json
/// {
///   "status": { "code": 200, "text": "" },
///   "custom": { "infoList": [ ... ] }
/// }
/// ```
///
/// `status.code` of `1` or `200` is success. The raw code is copied to the
/// result as the `status` overlay field.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusEnvelopeHandler;

impl StatusEnvelopeHandler {
    pub const NAME: &'static str = "status envelope";

    pub fn new() -> Self {
        Self
    }

    /// Fallback text for a failed status code
    pub fn error_text(code: Option<&Value>) -> &'static str {
        let Some(code) = coerce_field(code) else {
            return messages::STATUS_ERROR;
        };
        ERROR_TEXTS
            .iter()
            .find(|(known, _)| *known == code)
            .map_or(messages::STATUS_ERROR, |&(_, text)| text)
    }
}

impl FormatHandler for StatusEnvelopeHandler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn try_handle(
        &self,
        payload: &Value,
        path: &str,
        acc: &mut NormalizedResult,
    ) -> HandlerOutcome {
        let Some(status) = payload.get("status").filter(|v| is_truthy(v)) else {
            return HandlerOutcome::Declined;
        };
        if path.is_empty() || !payload.get("custom").is_some_and(is_truthy) {
            return HandlerOutcome::Declined;
        }

        let code = status.get("code");
        if let Some(raw) = code {
            acc.set_overlay("status", raw.clone());
        }
        acc.message = text_of(status.get("text")).unwrap_or_default();

        if matches_any(code, &[STATUS_SUCCESS, STATUS_SUCCESS_HTTP]) {
            acc.code = ResultCode::Success;
            match resolve(Some(payload), path) {
                Some(data) => acc.data = Some(data.clone()),
                None => {
                    if acc.message.is_empty() {
                        acc.message = messages::PATH_NOT_FOUND.to_string();
                    }
                    acc.data = None;
                }
            }
        } else {
            acc.code = ResultCode::Failure;
            acc.data = None;
            if acc.message.is_empty() {
                acc.message = Self::error_text(code).to_string();
            }
            debug!(path, code = ?code, "status envelope reported failure");
        }

        acc.set_debug_kind(format!("{}: {}", Self::NAME, path));
        HandlerOutcome::Committed
    }
}
