use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::messages;

/// Outcome of a normalization, independent of any backend's numeric convention.
///
/// Serialized as `1` / `0` so normalized output reads like the envelopes it
/// came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultCode {
    Success,
    #[default]
    Failure,
}

impl ResultCode {
    pub fn is_success(self) -> bool {
        matches!(self, ResultCode::Success)
    }

    pub fn as_i32(self) -> i32 {
        match self {
            ResultCode::Success => 1,
            ResultCode::Failure => 0,
        }
    }
}

impl Serialize for ResultCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.as_i32())
    }
}

impl<'de> Deserialize<'de> for ResultCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Ok(if raw == 1 {
            ResultCode::Success
        } else {
            ResultCode::Failure
        })
    }
}

/// Diagnostics attached when the pipeline runs in debug mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugInfo {
    /// Which handler matched, e.g. `tiered envelope: custom.infoList`
    #[serde(rename = "type")]
    pub kind: String,
    /// Raw payload echo, only set when nothing matched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Default for DebugInfo {
    fn default() -> Self {
        Self {
            kind: messages::UNKNOWN_FORMAT.to_string(),
            data: None,
        }
    }
}

/// Field names reserved for the core result; overlays never shadow them.
const CORE_FIELDS: [&str; 4] = ["code", "message", "data", "debugInfo"];

/// Uniform `{code, message, data}` shape produced by the pipeline.
///
/// Handlers receive a fresh default accumulator per attempt and fill it in
/// place once their envelope matches.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResult {
    pub code: ResultCode,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_info: Option<DebugInfo>,
    /// Backend-specific fields (e.g. the raw `status` code)
    #[serde(flatten)]
    pub overlay: Map<String, Value>,
}

impl NormalizedResult {
    /// Seed value handed to each handler attempt
    pub fn seed() -> Self {
        Self {
            debug_info: Some(DebugInfo::default()),
            ..Self::default()
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::seed()
        }
    }

    pub fn has_data(&self) -> bool {
        self.data.as_ref().is_some_and(|v| !v.is_null())
    }

    /// Attach a backend-specific field. Core field names are refused.
    pub fn set_overlay(&mut self, key: &str, value: Value) -> bool {
        if CORE_FIELDS.contains(&key) {
            return false;
        }
        self.overlay.insert(key.to_string(), value);
        true
    }

    pub fn overlay(&self, key: &str) -> Option<&Value> {
        self.overlay.get(key)
    }

    /// Record which handler claimed the payload
    pub fn set_debug_kind(&mut self, kind: String) {
        self.debug_info
            .get_or_insert_with(DebugInfo::default)
            .kind = kind;
    }
}

/// Candidate data paths: one dotted string or an ordered list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataPath {
    Single(String),
    List(Vec<String>),
}

impl DataPath {
    pub fn into_paths(self) -> Vec<String> {
        match self {
            DataPath::Single(path) => vec![path],
            DataPath::List(paths) => paths,
        }
    }
}

impl From<&str> for DataPath {
    fn from(path: &str) -> Self {
        DataPath::Single(path.to_string())
    }
}

impl From<String> for DataPath {
    fn from(path: String) -> Self {
        DataPath::Single(path)
    }
}

impl From<Vec<String>> for DataPath {
    fn from(paths: Vec<String>) -> Self {
        DataPath::List(paths)
    }
}

impl From<&[&str]> for DataPath {
    fn from(paths: &[&str]) -> Self {
        DataPath::List(paths.iter().map(|p| p.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for DataPath {
    fn from(paths: [&str; N]) -> Self {
        DataPath::List(paths.iter().map(|p| p.to_string()).collect())
    }
}

/// Caller options for [`normalize`](super::normalize)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizeOptions {
    /// `None` turns the pipeline into a pass-through
    #[serde(default)]
    pub data_path: Option<DataPath>,
    #[serde(default)]
    pub is_debug: bool,
}

impl NormalizeOptions {
    pub fn with_path(path: impl Into<DataPath>) -> Self {
        Self {
            data_path: Some(path.into()),
            is_debug: false,
        }
    }

    pub fn debug(mut self, is_debug: bool) -> Self {
        self.is_debug = is_debug;
        self
    }
}

/// What the pipeline hands back: either the raw payload untouched (no data
/// path requested) or a normalized result.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizeOutput {
    Passthrough(Option<Value>),
    Normalized(NormalizedResult),
}

impl NormalizeOutput {
    pub fn normalized(&self) -> Option<&NormalizedResult> {
        match self {
            NormalizeOutput::Normalized(result) => Some(result),
            NormalizeOutput::Passthrough(_) => None,
        }
    }

    pub fn into_normalized(self) -> Option<NormalizedResult> {
        match self {
            NormalizeOutput::Normalized(result) => Some(result),
            NormalizeOutput::Passthrough(_) => None,
        }
    }

    /// The usable data: the extracted fragment, or the raw payload on pass-through
    pub fn into_data(self) -> Option<Value> {
        match self {
            NormalizeOutput::Passthrough(payload) => payload,
            NormalizeOutput::Normalized(result) => result.data.filter(|v| !v.is_null()),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            NormalizeOutput::Passthrough(payload) => payload.clone().unwrap_or(Value::Null),
            NormalizeOutput::Normalized(result) => {
                serde_json::to_value(result).unwrap_or(Value::Null)
            }
        }
    }
}
