//! Configuration management for pagefeed
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use pagefeed::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Data paths: {:?}", config.normalize.data_paths);
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `PAGEFEED__<section>__<key>`
//!
//! Examples:
//! - `PAGEFEED__REQUEST__URL=https://api.example.com/list`
//! - `PAGEFEED__REQUEST__TIMEOUT=10s`
//! - `PAGEFEED__PAGING__INIT_PAGE_INDEX=1`
//!
//! `PAGEFEED_AUTH_TOKEN` is sent as a bearer `Authorization` header.
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/pagefeed.toml`.
//! This can be overridden using the `PAGEFEED_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use crate::humanize::HumanDuration;
pub use models::{
    Config, ContentType, NormalizeConfig, PagingConfig, RenderConfig, RequestConfig,
    RequestMethod,
};
pub use validation::ValidationError;

use thiserror::Error;

use crate::normalize::NormalizeOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or
    /// validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Pipeline options for page responses
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions::with_path(self.normalize.data_paths.clone())
            .debug(self.normalize.debug)
    }
}
