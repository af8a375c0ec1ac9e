//! Error types for one relay step
//!
//! Every variant is scoped to a single symbol in a single tick. The
//! scheduler logs them and moves on.

use std::num::ParseFloatError;

use thiserror::Error;

/// Errors from fetching a quote from the provider
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to fetch quote: {source}")]
    Transport { source: reqwest::Error },

    #[error("provider returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("failed to decode provider response: {source}")]
    Decode { source: serde_json::Error },

    #[error("{0}")]
    Schema(SchemaError),

    #[error("failed to parse price '{value}': {reason}")]
    Parse { value: String, reason: String },
}

/// The provider answered with JSON that does not carry a usable quote.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// `Global Quote` is missing or is not an object. `detail` carries the
    /// provider's advisory message when it sent one instead.
    #[error("unexpected response format{}", advisory_suffix(.detail))]
    UnexpectedFormat { detail: Option<String> },

    #[error("price not found in response")]
    PriceNotFound,
}

fn advisory_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|message| format!(": {message}"))
        .unwrap_or_default()
}

impl FetchError {
    pub fn transport(source: reqwest::Error) -> Self {
        Self::Transport { source }
    }

    pub fn decode(source: serde_json::Error) -> Self {
        Self::Decode { source }
    }

    pub fn unparsable(value: impl Into<String>, source: ParseFloatError) -> Self {
        Self::Parse {
            value: value.into(),
            reason: source.to_string(),
        }
    }

    pub fn non_finite(value: impl Into<String>) -> Self {
        Self::Parse {
            value: value.into(),
            reason: "value is not finite".into(),
        }
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::HttpStatus { .. } => "http_status",
            Self::Decode { .. } => "decode",
            Self::Schema(_) => "schema",
            Self::Parse { .. } => "parse",
        }
    }
}

impl From<SchemaError> for FetchError {
    fn from(err: SchemaError) -> Self {
        Self::Schema(err)
    }
}

/// Errors from delivering an update to the broker
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("failed to serialize update: {source}")]
    Serialize { source: serde_json::Error },

    #[error("failed to send update: {source}")]
    Transport { source: reqwest::Error },

    #[error("broker returned HTTP {status}")]
    HttpStatus { status: u16 },
}

impl PublishError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Serialize { .. } => "serialize",
            Self::Transport { .. } => "transport",
            Self::HttpStatus { .. } => "http_status",
        }
    }
}
