use crate::humanize::HumanDuration;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub request: RequestConfig,
    #[serde(default)]
    pub paging: PagingConfig,
    #[serde(default)]
    pub normalize: NormalizeConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

/// HTTP method used for page requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestMethod {
    Get,
    #[default]
    Post,
}

/// Body encoding for POST requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Form,
    Json,
}

impl ContentType {
    pub fn mime(&self) -> &'static str {
        match self {
            ContentType::Form => "application/x-www-form-urlencoded",
            ContentType::Json => "application/json",
        }
    }
}

/// Remote data source configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RequestConfig {
    /// Page endpoint; requests fail fast while unset
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub method: RequestMethod,
    #[serde(default)]
    pub content_type: ContentType,
    #[serde(default = "default_timeout")]
    pub timeout: HumanDuration,
    /// Extra request headers
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Static request parameters sent with every page
    #[serde(default)]
    pub params: BTreeMap<String, String>,
    /// Parameter carrying the current page number
    #[serde(default = "default_page_param")]
    pub page_param: String,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            url: None,
            method: RequestMethod::default(),
            content_type: ContentType::default(),
            timeout: default_timeout(),
            headers: BTreeMap::new(),
            params: BTreeMap::new(),
            page_param: default_page_param(),
        }
    }
}

fn default_timeout() -> HumanDuration {
    HumanDuration::from_millis(6000)
}

fn default_page_param() -> String {
    "pageIndex".to_string()
}

/// Pagination behaviour
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PagingConfig {
    /// First page number; backends differ (0 or 1)
    #[serde(default)]
    pub init_page_index: i64,
    /// Wait before each request after a gesture
    #[serde(default)]
    pub delay: HumanDuration,
    /// Whether the first page is loaded through an automatic pull-up
    #[serde(default = "default_true")]
    pub auto_load: bool,
    #[serde(default = "default_true")]
    pub auto_render: bool,
    /// Pull-up (load more) enabled
    #[serde(default = "default_true")]
    pub pull_up: bool,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            init_page_index: 0,
            delay: HumanDuration::default(),
            auto_load: true,
            auto_render: true,
            pull_up: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Normalization defaults for page responses
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NormalizeConfig {
    /// Candidate list paths, tried in order
    #[serde(default = "default_data_paths")]
    pub data_paths: Vec<String>,
    #[serde(default)]
    pub debug: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            data_paths: default_data_paths(),
            debug: false,
        }
    }
}

fn default_data_paths() -> Vec<String> {
    vec![
        "custom.infoList".to_string(),
        "custom.infolist".to_string(),
        "UserArea.InfoList".to_string(),
    ]
}

/// Item rendering
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RenderConfig {
    /// Item template with `{{path}}` placeholders
    #[serde(default)]
    pub template: String,
}
