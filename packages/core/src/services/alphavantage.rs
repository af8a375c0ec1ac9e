//! Alpha Vantage `GLOBAL_QUOTE` client
//!
//! The provider answers with a loosely shaped JSON object. Only
//! `Global Quote` -> `05. price` is read; everything else is ignored.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::relay::{
    error::{FetchError, SchemaError},
    provider::QuoteProvider,
};

pub const DEFAULT_PROVIDER_URL: &str = "https://www.alphavantage.co/query";

#[derive(Clone)]
pub struct AlphaVantageClient {
    base_url: String,
    api_key: String,
    http: Client,
}

impl AlphaVantageClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            http,
        }
    }
}

/// Top-level fields of a quote response. The advisory keys show up
/// instead of `Global Quote` when a call is throttled or invalid.
#[derive(Debug, Deserialize)]
struct QuoteEnvelope {
    #[serde(rename = "Global Quote")]
    quote: Option<Value>,
    #[serde(rename = "Note")]
    note: Option<Value>,
    #[serde(rename = "Information")]
    information: Option<Value>,
    #[serde(rename = "Error Message")]
    error_message: Option<Value>,
}

impl QuoteEnvelope {
    fn advisory(&self) -> Option<String> {
        [&self.error_message, &self.note, &self.information]
            .into_iter()
            .flatten()
            .find_map(|value| value.as_str().map(str::to_string))
    }
}

#[derive(Debug, Deserialize)]
struct GlobalQuote {
    #[serde(rename = "05. price")]
    price: String,
}

impl AlphaVantageClient {
    pub async fn fetch_global_quote(&self, symbol: &str) -> Result<f64, FetchError> {
        tracing::debug!(symbol, "Requesting global quote");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", symbol),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(FetchError::transport)?;

        if !response.status().is_success() {
            return Err(FetchError::HttpStatus {
                status: response.status().as_u16(),
            });
        }

        let body = response.bytes().await.map_err(FetchError::transport)?;

        extract_price(&body)
    }
}

/// Pull `Global Quote` -> `05. price` out of a response body.
pub(crate) fn extract_price(body: &[u8]) -> Result<f64, FetchError> {
    let object: Map<String, Value> = serde_json::from_slice(body).map_err(FetchError::decode)?;
    let envelope: QuoteEnvelope =
        serde_json::from_value(Value::Object(object)).map_err(FetchError::decode)?;

    let quote = match envelope.quote {
        Some(Value::Object(quote)) => quote,
        _ => {
            return Err(SchemaError::UnexpectedFormat {
                detail: envelope.advisory(),
            }
            .into())
        }
    };

    let quote: GlobalQuote =
        serde_json::from_value(Value::Object(quote)).map_err(|_| SchemaError::PriceNotFound)?;

    let raw = quote.price.trim();
    let price = raw
        .parse::<f64>()
        .map_err(|err| FetchError::unparsable(raw, err))?;

    if !price.is_finite() {
        return Err(FetchError::non_finite(raw));
    }

    Ok(price)
}

#[async_trait]
impl QuoteProvider for AlphaVantageClient {
    async fn fetch_price(&self, symbol: &str) -> Result<f64, FetchError> {
        self.fetch_global_quote(symbol).await
    }

    fn provider_name(&self) -> &str {
        "Alpha Vantage"
    }
}
