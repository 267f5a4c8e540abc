//! HTTP transport for page requests

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::config::{ContentType, RequestConfig, RequestMethod};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid header '{0}'")]
    InvalidHeader(String),

    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("Response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TransportError>;

/// One page request, built by the controller for each gesture
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub request_id: Uuid,
    pub url: String,
    pub page: i64,
    pub method: RequestMethod,
    pub content_type: ContentType,
    pub timeout: Duration,
    pub headers: BTreeMap<String, String>,
    /// Static params plus the page number
    pub params: Map<String, Value>,
}

impl PageRequest {
    pub fn from_config(url: &str, config: &RequestConfig, page: i64) -> Self {
        let mut params: Map<String, Value> = config
            .params
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        params.insert(config.page_param.clone(), Value::from(page));

        Self {
            request_id: Uuid::new_v4(),
            url: url.to_string(),
            page,
            method: config.method,
            content_type: config.content_type,
            timeout: config.timeout.as_duration(),
            headers: config.headers.clone(),
            params,
        }
    }

    /// Params flattened to string pairs for query strings and form bodies
    pub fn param_pairs(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(k, v)| {
                let value = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), value)
            })
            .collect()
    }
}

/// Source of raw page payloads
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, request: &PageRequest) -> Result<Value>;
}

/// reqwest-backed transport
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn headers(request: &PageRequest) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| TransportError::InvalidHeader(name.clone()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| TransportError::InvalidHeader(name.to_string()))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, request: &PageRequest) -> Result<Value> {
        debug!(request_id = %request.request_id, url = %request.url, page = request.page, "Requesting page");

        let builder = match request.method {
            RequestMethod::Get => self.client.get(&request.url).query(&request.param_pairs()),
            RequestMethod::Post => {
                let builder = self
                    .client
                    .post(&request.url)
                    .header(CONTENT_TYPE, request.content_type.mime());
                match request.content_type {
                    ContentType::Form => builder.form(&request.param_pairs()),
                    ContentType::Json => builder.body(serde_json::to_vec(&request.params)?),
                }
            }
        };

        let response = builder
            .headers(Self::headers(request)?)
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout(request.timeout)
                } else {
                    TransportError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::RequestFailed(format!("Failed to read body: {}", e)))?;

        debug!(request_id = %request.request_id, size = body.len(), "Page received");
        decode_body(body)
    }
}

/// An empty body is treated as an empty payload, not a decode error
pub fn decode_body(body: Bytes) -> Result<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&body)?)
}
