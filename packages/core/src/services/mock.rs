//! In-memory provider and publisher for scheduler tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::relay::{
    error::{FetchError, PublishError, SchemaError},
    provider::{QuoteProvider, UpdatePublisher},
    types::UpdateRecord,
};

#[derive(Debug, Clone, Copy)]
pub enum MockFailure {
    Status(u16),
    PriceNotFound,
}

/// Provider with canned per-symbol answers. Unknown symbols fail with a
/// schema error, the way the real provider answers `{"Global Quote": {}}`.
#[derive(Default)]
pub struct MockQuoteProvider {
    prices: HashMap<String, f64>,
    failures: HashMap<String, MockFailure>,
    calls: Mutex<Vec<String>>,
}

impl MockQuoteProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(mut self, symbol: &str, price: f64) -> Self {
        self.prices.insert(symbol.to_string(), price);
        self
    }

    pub fn with_failure(mut self, symbol: &str, failure: MockFailure) -> Self {
        self.failures.insert(symbol.to_string(), failure);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuoteProvider for MockQuoteProvider {
    async fn fetch_price(&self, symbol: &str) -> Result<f64, FetchError> {
        self.calls.lock().unwrap().push(symbol.to_string());

        match self.failures.get(symbol) {
            Some(MockFailure::Status(status)) => {
                return Err(FetchError::HttpStatus { status: *status })
            }
            Some(MockFailure::PriceNotFound) => return Err(SchemaError::PriceNotFound.into()),
            None => {}
        }

        self.prices
            .get(symbol)
            .copied()
            .ok_or_else(|| SchemaError::PriceNotFound.into())
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}

/// Publisher that records every delivered update.
#[derive(Default)]
pub struct MockPublisher {
    rejected: HashMap<String, u16>,
    delivered: Mutex<Vec<UpdateRecord>>,
    attempts: Mutex<Vec<String>>,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(mut self, symbol: &str, status: u16) -> Self {
        self.rejected.insert(symbol.to_string(), status);
        self
    }

    pub fn delivered(&self) -> Vec<UpdateRecord> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpdatePublisher for MockPublisher {
    async fn publish(&self, record: &UpdateRecord) -> Result<(), PublishError> {
        self.attempts.lock().unwrap().push(record.stock_symbol.clone());

        if let Some(status) = self.rejected.get(&record.stock_symbol) {
            return Err(PublishError::HttpStatus { status: *status });
        }

        self.delivered.lock().unwrap().push(record.clone());
        Ok(())
    }

    fn destination(&self) -> &str {
        "mock://broker"
    }
}
