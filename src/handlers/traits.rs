use serde_json::Value;

use crate::normalize::NormalizedResult;

/// What a handler did with one (payload, path) attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// The payload is not this handler's envelope; the accumulator is untouched
    Declined,
    /// The envelope matched and the accumulator is fully populated
    Committed,
}

/// Format handler trait for envelope recognition
///
/// A handler checks the required top-level fields of its envelope first and
/// declines without touching `acc` when they are missing. Once the shape
/// matches it always commits: `code`, `message`, `data` and the debug type
/// are all set, even when the backend reported a failure or the path
/// resolved to nothing.
///
/// Handlers hold no state between calls and may be shared across threads.
pub trait FormatHandler: Send + Sync {
    /// Short label used in debug output and logs
    fn name(&self) -> &'static str;

    fn try_handle(&self, payload: &Value, path: &str, acc: &mut NormalizedResult)
    -> HandlerOutcome;
}
