//! API key resolution.
//!
//! The key is looked up in an ordered list of sources, first hit wins:
//! the secrets file, then the environment. Blank values are treated as
//! missing. Keys are wrapped in `SecretString` so they never show up in
//! `Debug` output or logs.

use secrecy::SecretString;
use std::path::PathBuf;
use tracing::debug;

use crate::config::PriceApiConfig;
use crate::types::FetchError;

/// One place an API key might live.
pub trait KeySource: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &str;

    /// The key, if this source has a non-blank one.
    fn lookup(&self) -> Option<SecretString>;
}

fn non_blank(value: &str) -> Option<SecretString> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(SecretString::new(trimmed.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Secrets file
// ---------------------------------------------------------------------------

/// A TOML secrets file with the key stored under `key_name`:
///
/// ```toml
/// GOLDAPI_KEY = "goldapi-xxxx"
/// ```
pub struct SecretsFileSource {
    path: PathBuf,
    key_name: String,
}

impl SecretsFileSource {
    pub fn new(path: impl Into<PathBuf>, key_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key_name: key_name.into(),
        }
    }
}

impl KeySource for SecretsFileSource {
    fn name(&self) -> &str {
        "secrets-file"
    }

    fn lookup(&self) -> Option<SecretString> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let table: toml::Table = match toml::from_str(&contents) {
            Ok(t) => t,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "Secrets file is not valid TOML");
                return None;
            }
        };
        table
            .get(&self.key_name)
            .and_then(|v| v.as_str())
            .and_then(non_blank)
    }
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// An environment variable holding the key.
pub struct EnvSource {
    var: String,
}

impl EnvSource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl KeySource for EnvSource {
    fn name(&self) -> &str {
        "environment"
    }

    fn lookup(&self) -> Option<SecretString> {
        std::env::var(&self.var).ok().as_deref().and_then(non_blank)
    }
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Tries each source in order and stops at the first key found.
pub struct KeyResolver {
    sources: Vec<Box<dyn KeySource>>,
}

impl KeyResolver {
    pub fn new(sources: Vec<Box<dyn KeySource>>) -> Self {
        Self { sources }
    }

    /// Secrets file first, then the environment.
    pub fn from_config(cfg: &PriceApiConfig) -> Self {
        Self::new(vec![
            Box::new(SecretsFileSource::new(&cfg.secrets_path, &cfg.secret_name)),
            Box::new(EnvSource::new(&cfg.api_key_env)),
        ])
    }

    pub fn resolve(&self) -> Result<SecretString, FetchError> {
        for source in &self.sources {
            if let Some(key) = source.lookup() {
                debug!(source = source.name(), "API key resolved");
                return Ok(key);
            }
            debug!(source = source.name(), "No API key in source");
        }
        Err(FetchError::NoApiKey)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
