use serde_json::Value;
use tracing::debug;

use super::traits::{FormatHandler, HandlerOutcome};
use crate::normalize::{NormalizedResult, ResultCode, messages, resolve};
use crate::numeric::{is_truthy, matches_any, text_of};

const STATUS_SUCCESS: f64 = 1.0;

/// Two-tier envelope: transport status in `ReturnInfo`, business status in
/// `BusinessInfo`.
///
/// ```json
/// {
///   "ReturnInfo":   { "Code": 1, "Description": "" },
///   "BusinessInfo": { "Code": 1, "Description": "" },
///   "UserArea":     { "InfoList": [ ... ] }
/// }
/// ```
///
/// Both tiers must report `1` for the data at the requested path to be
/// extracted. The transport tier is checked first.
#[derive(Debug, Clone, Copy, Default)]
pub struct TieredEnvelopeHandler;

impl TieredEnvelopeHandler {
    pub const NAME: &'static str = "tiered envelope";

    pub fn new() -> Self {
        Self
    }
}

impl FormatHandler for TieredEnvelopeHandler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn try_handle(
        &self,
        payload: &Value,
        path: &str,
        acc: &mut NormalizedResult,
    ) -> HandlerOutcome {
        let (Some(return_info), Some(business_info)) = (
            payload.get("ReturnInfo").filter(|v| is_truthy(v)),
            payload.get("BusinessInfo").filter(|v| is_truthy(v)),
        ) else {
            return HandlerOutcome::Declined;
        };
        if path.is_empty() {
            return HandlerOutcome::Declined;
        }

        if !matches_any(return_info.get("Code"), &[STATUS_SUCCESS]) {
            acc.code = ResultCode::Failure;
            acc.message = text_of(return_info.get("Description"))
                .unwrap_or_else(|| messages::TRANSPORT_ERROR.to_string());
            acc.data = None;
            debug!(path, code = ?return_info.get("Code"), "transport tier failed");
        } else if !matches_any(business_info.get("Code"), &[STATUS_SUCCESS]) {
            acc.code = ResultCode::Failure;
            acc.message = text_of(business_info.get("Description"))
                .unwrap_or_else(|| messages::BUSINESS_ERROR.to_string());
            acc.data = None;
            debug!(path, code = ?business_info.get("Code"), "business tier failed");
        } else {
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
        }

        acc.set_debug_kind(format!("{}: {}", Self::NAME, path));
        HandlerOutcome::Committed
    }
}
