//! Configuration
//!
//! Settings are read from command-line flags, falling back to environment
//! variables (optionally loaded from a `.env` file).

use std::path::PathBuf;

use clap::Args;
use rusty_money::{Findable, iso::Currency};
use thiserror::Error;

use crate::storage::{DEFAULT_STORAGE_KEY, FileStorage};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The currency code is not an ISO 4217 currency.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Cart storage and display settings.
#[derive(Debug, Clone, Args)]
pub struct CartConfig {
    /// Directory the cart record is stored in
    #[arg(long, env = "CART_STORAGE_DIR", default_value = ".cart")]
    pub storage_dir: PathBuf,

    /// Storage key the cart record is saved under
    #[arg(long, env = "CART_STORAGE_KEY", default_value = DEFAULT_STORAGE_KEY)]
    pub storage_key: String,

    /// Product catalog YAML file
    #[arg(long, env = "CART_CATALOG", default_value = "fixtures/products.yml")]
    pub catalog: PathBuf,

    /// ISO 4217 code of the currency prices are expressed in
    #[arg(long, env = "CART_CURRENCY", default_value = "COP")]
    pub currency: String,
}

impl CartConfig {
    /// Storage backend for the configured directory.
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.storage_dir)
    }

    /// Resolve the configured currency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCurrency`] if the code is not recognised.
    pub fn currency(&self) -> Result<&'static Currency, ConfigError> {
        Currency::find(&self.currency)
            .ok_or_else(|| ConfigError::UnknownCurrency(self.currency.clone()))
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Order service settings.
#[derive(Debug, Clone, Args)]
pub struct OrderApiConfig {
    /// Base URL of the order API
    #[arg(long, env = "ORDER_API_URL")]
    pub api_url: String,

    /// Bearer token for the order API
    #[arg(long, env = "ORDER_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,
}
