use super::models::Config;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("No data paths configured (at least one candidate path is required)")]
    NoDataPaths,

    #[error("Data path '{path}' contains an empty segment")]
    EmptyPathSegment { path: String },

    #[error("Request timeout must be positive")]
    ZeroTimeout,

    #[error("Invalid request url scheme in '{url}', expected 'http://' or 'https://'")]
    InvalidUrlScheme { url: String },

    #[error("Page parameter name must not be empty")]
    EmptyPageParam,
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_data_paths(config)?;
    validate_request(config)?;
    Ok(())
}

/// Every candidate path must be a well-formed dotted path
fn validate_data_paths(config: &Config) -> Result<(), ValidationError> {
    if config.normalize.data_paths.is_empty() {
        return Err(ValidationError::NoDataPaths);
    }

    for path in &config.normalize.data_paths {
        if path.split('.').any(str::is_empty) {
            return Err(ValidationError::EmptyPathSegment { path: path.clone() });
        }
    }

    Ok(())
}

fn validate_request(config: &Config) -> Result<(), ValidationError> {
    let request = &config.request;

    if request.timeout.is_zero() {
        return Err(ValidationError::ZeroTimeout);
    }

    if let Some(url) = request.url.as_deref() {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ValidationError::InvalidUrlScheme { url: url.to_string() });
        }
    }

    if request.page_param.trim().is_empty() {
        return Err(ValidationError::EmptyPageParam);
    }

    Ok(())
}
