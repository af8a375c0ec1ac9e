//! Data model for relayed quote updates

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One relayed observation.
///
/// Built fresh after every successful fetch and consumed by exactly one
/// publish call. Field names are the receiver's wire names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRecord {
    pub stock_symbol: String,
    pub price: f64,
    /// RFC 3339, UTC, second precision (`2024-01-01T00:00:00Z`).
    pub timestamp: String,
}

impl UpdateRecord {
    pub fn new(stock_symbol: impl Into<String>, price: f64, observed_at: DateTime<Utc>) -> Self {
        Self {
            stock_symbol: stock_symbol.into(),
            price,
            timestamp: observed_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }

    /// Stamp a freshly fetched price with the current wall-clock time.
    pub fn observed_now(stock_symbol: impl Into<String>, price: f64) -> Self {
        Self::new(stock_symbol, price, Utc::now())
    }
}

/// The fixed, ordered list of symbols relayed on every tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedSymbols(Vec<String>);

impl TrackedSymbols {
    /// Build from an ordered list. Blank entries are dropped and duplicates
    /// keep their first position.
    pub fn new<I, S>(symbols: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for symbol in symbols {
            let symbol = symbol.as_ref().trim();
            if symbol.is_empty() || out.iter().any(|s| s == symbol) {
                continue;
            }
            out.push(symbol.to_string());
        }

        if out.is_empty() {
            return Err("at least one symbol must be tracked".into());
        }

        Ok(Self(out))
    }

    /// Parse a comma-separated list such as `AAPL, GOOGL,MSFT`.
    pub fn parse(raw: &str) -> Result<Self, String> {
        Self::new(raw.split(','))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for TrackedSymbols {
    fn default() -> Self {
        Self(vec!["AAPL".into(), "GOOGL".into(), "MSFT".into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    #[test]
    fn record_serializes_with_receiver_field_names() {
        let observed_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let record = UpdateRecord::new("GOOGL", 138.5, observed_at);

        let body = serde_json::to_string(&record).unwrap();

        assert_eq!(
            body,
            r#"{"stock_symbol":"GOOGL","price":138.5,"timestamp":"2024-01-01T00:00:00Z"}"#
        );
    }

    #[test]
    fn observed_now_timestamp_is_rfc3339_utc() {
        let before = Utc::now();
        let record = UpdateRecord::observed_now("AAPL", 1.0);

        let parsed = DateTime::parse_from_rfc3339(&record.timestamp).unwrap();
        assert!(record.timestamp.ends_with('Z'));
        assert!(parsed.timestamp() >= before.timestamp());
    }

    #[test]
    fn parse_keeps_configured_order() {
        let symbols = TrackedSymbols::parse("MSFT,AAPL,GOOGL").unwrap();
        let order: Vec<&str> = symbols.iter().collect();
        assert_eq!(order, vec!["MSFT", "AAPL", "GOOGL"]);
    }

    #[test]
    fn parse_trims_and_drops_blanks_and_duplicates() {
        let symbols = TrackedSymbols::parse(" AAPL , ,GOOGL,AAPL,").unwrap();
        let order: Vec<&str> = symbols.iter().collect();
        assert_eq!(order, vec!["AAPL", "GOOGL"]);
    }

    #[test]
    fn parse_rejects_empty_list() {
        assert!(TrackedSymbols::parse(" , ").is_err());
        assert!(TrackedSymbols::parse("").is_err());
    }

    #[test]
    fn default_symbols() {
        assert_eq!(TrackedSymbols::default().len(), 3);
    }

    proptest! {
        #[test]
        fn record_survives_receiver_decode(
            symbol in "[A-Z]{1,5}",
            price in 0.0f64..1.0e7,
            secs in 0i64..4_000_000_000,
        ) {
            let observed_at = Utc.timestamp_opt(secs, 0).unwrap();
            let record = UpdateRecord::new(symbol.clone(), price, observed_at);

            let body = serde_json::to_vec(&record).unwrap();
            let decoded: UpdateRecord = serde_json::from_slice(&body).unwrap();

            prop_assert_eq!(decoded.stock_symbol, symbol);
            prop_assert!((decoded.price - price).abs() <= f64::EPSILON * price.abs().max(1.0));
            prop_assert_eq!(decoded.timestamp, record.timestamp);
        }
    }
}
