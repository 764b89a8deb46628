//! GoldAPI.io quote client.
//!
//! API: `https://www.goldapi.io/api/XAU/USD`
//! Auth: API key in the `x-access-token` header.
//! Response: JSON object; the spot price is the numeric `price` field.
//!
//! Single attempt per call, client default timeout, no caching.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use secrecy::ExposeSecret;
use tracing::{debug, info, warn};

use super::credentials::KeyResolver;
use super::PriceSource;
use crate::config::PriceApiConfig;
use crate::types::FetchError;

const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// GoldAPI.io client.
pub struct GoldApiClient {
    http: Client,
    endpoint: String,
    price_field: String,
    resolver: KeyResolver,
}

impl GoldApiClient {
    pub fn new(
        endpoint: impl Into<String>,
        price_field: impl Into<String>,
        resolver: KeyResolver,
    ) -> Result<Self> {
        let http = Client::builder()
            .user_agent("GOLDDESK/0.1.0")
            .build()
            .context("Failed to build HTTP client for GoldAPI")?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            price_field: price_field.into(),
            resolver,
        })
    }

    pub fn from_config(cfg: &PriceApiConfig) -> Result<Self> {
        Self::new(&cfg.endpoint, &cfg.price_field, KeyResolver::from_config(cfg))
    }

    /// Pull the price out of a decoded response body.
    fn extract_price(body: &serde_json::Value, field: &str) -> Result<f64, FetchError> {
        let value = body
            .get(field)
            .ok_or_else(|| FetchError::InvalidResponse(format!("missing field `{field}`")))?;
        let price = value
            .as_f64()
            .ok_or_else(|| FetchError::InvalidResponse(format!("field `{field}` is not a number")))?;
        if price <= 0.0 {
            return Err(FetchError::InvalidResponse(format!(
                "field `{field}` is not a positive price: {price}"
            )));
        }
        Ok(price)
    }
}

#[async_trait]
impl PriceSource for GoldApiClient {
    async fn fetch_price(&self) -> Result<f64, FetchError> {
        let key = self.resolver.resolve()?;

        debug!(endpoint = %self.endpoint, "Fetching gold price");

        let resp = self
            .http
            .get(&self.endpoint)
            .header(ACCESS_TOKEN_HEADER, key.expose_secret().as_str())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::RequestException(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "GoldAPI returned an error status");
            return Err(FetchError::HttpError(status.as_u16()));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| FetchError::RequestException(e.to_string()))?;

        let body: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| FetchError::InvalidResponse(format!("body is not JSON: {e}")))?;

        let price = Self::extract_price(&body, &self.price_field)?;
        info!(price, "Gold price fetched");
        Ok(price)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
