//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs. Every
//! field has a default, so a missing file or section falls back to the
//! GoldAPI.io endpoint on port 8501. The API key itself never lives here:
//! the config only names the secrets file entry and environment variable
//! to look it up in.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::types::DeskError;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub desk: DeskConfig,
    pub price_api: PriceApiConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DeskConfig {
    pub name: String,
    pub host: String,
    pub port: u16,
    /// Live sessions kept before the oldest is evicted.
    pub max_sessions: usize,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            name: "GOLDDESK".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8501,
            max_sessions: 1000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PriceApiConfig {
    pub endpoint: String,
    /// JSON field holding the numeric price.
    pub price_field: String,
    /// Entry name inside the secrets file.
    pub secret_name: String,
    pub secrets_path: String,
    /// Environment variable checked when the secrets file has no key.
    pub api_key_env: String,
}

impl Default for PriceApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://www.goldapi.io/api/XAU/USD".to_string(),
            price_field: "price".to_string(),
            secret_name: "GOLDAPI_KEY".to_string(),
            secrets_path: "secrets.toml".to_string(),
            api_key_env: "GOLDAPI_KEY".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Load the file if it exists, otherwise use defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            info!(path, "No config file found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        Ok(config)
    }

    /// Reject settings the desk cannot run with.
    pub fn validate(&self) -> Result<(), DeskError> {
        if self.price_api.endpoint.trim().is_empty() {
            return Err(DeskError::Config("price_api.endpoint is empty".into()));
        }
        if self.price_api.price_field.trim().is_empty() {
            return Err(DeskError::Config("price_api.price_field is empty".into()));
        }
        if self.desk.max_sessions == 0 {
            return Err(DeskError::Config("desk.max_sessions must be at least 1".into()));
        }
        Ok(())
    }
}
