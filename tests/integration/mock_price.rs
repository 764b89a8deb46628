//! Scripted price source for integration testing.
//!
//! Returns a queued sequence of outcomes, one per call, and counts how many
//! fetches were made. All in-memory with no network access.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use golddesk::price::PriceSource;
use golddesk::types::FetchError;

pub struct ScriptedPriceSource {
    outcomes: Mutex<VecDeque<Result<f64, FetchError>>>,
    calls: AtomicUsize,
}

impl ScriptedPriceSource {
    pub fn new(outcomes: Vec<Result<f64, FetchError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceSource for ScriptedPriceSource {
    async fn fetch_price(&self) -> Result<f64, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::RequestException("script exhausted".into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_order() {
        let source = ScriptedPriceSource::new(vec![Ok(1.0), Err(FetchError::HttpError(500))]);
        assert_eq!(tokio_test::block_on(source.fetch_price()), Ok(1.0));
        assert_eq!(
            tokio_test::block_on(source.fetch_price()),
            Err(FetchError::HttpError(500))
        );
        assert!(matches!(
            tokio_test::block_on(source.fetch_price()),
            Err(FetchError::RequestException(_))
        ));
        assert_eq!(source.calls(), 3);
    }
}
