//! Provider and publisher interfaces
//!
//! Keeps the scheduler independent of the concrete HTTP clients so it can be
//! driven by in-memory fakes.

use async_trait::async_trait;

use crate::relay::{
    error::{FetchError, PublishError},
    types::UpdateRecord,
};

/// Source of the latest price for a symbol
#[async_trait]
pub trait QuoteProvider {
    /// Fetch the latest price. One attempt, no caching.
    async fn fetch_price(&self, symbol: &str) -> Result<f64, FetchError>;

    /// Name of this provider for logging
    fn provider_name(&self) -> &str;
}

/// Destination for relayed updates
#[async_trait]
pub trait UpdatePublisher {
    /// Deliver one record. One attempt, no retry.
    async fn publish(&self, record: &UpdateRecord) -> Result<(), PublishError>;

    /// Where records are sent, for logging
    fn destination(&self) -> &str;
}
