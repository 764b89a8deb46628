//! Live gold price fetching.
//!
//! Defines the `PriceSource` trait and the GoldAPI.io implementation,
//! along with the ordered credential lookup it uses for its API key.

pub mod credentials;
pub mod goldapi;

use async_trait::async_trait;

use crate::types::FetchError;

/// Abstraction over live quote providers.
///
/// One call is one attempt: implementors do not retry or cache.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the current price, or the reason there is none.
    async fn fetch_price(&self) -> Result<f64, FetchError>;
}
