//! Fixed message texts surfaced in [`NormalizedResult::message`](super::NormalizedResult)

pub const EMPTY_PAYLOAD: &str = "payload is empty";
pub const NO_MATCH: &str = "no handler or payload shape matched";
pub const UNKNOWN_FORMAT: &str = "unknown format";
pub const PATH_NOT_FOUND: &str = "no data found at the requested path";

pub const TRANSPORT_ERROR: &str = "request failed: backend transport error";
pub const BUSINESS_ERROR: &str = "request failed: backend business logic error";

pub const STATUS_ERROR: &str = "status error";
pub const INVALID_PARAMETERS: &str = "invalid input parameters";
pub const AUTH_FAILED: &str = "authentication failed";
pub const SERVER_ERROR: &str = "server error";
pub const BUSINESS_FAILURE: &str = "business error";
