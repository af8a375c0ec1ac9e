//! Quote relay core
//!
//! Types, errors and trait seams shared by the provider client, the broker
//! client and the scheduler.

pub mod error;
pub mod provider;
pub mod types;

pub use error::{FetchError, PublishError, SchemaError};
pub use provider::{QuoteProvider, UpdatePublisher};
pub use types::{TrackedSymbols, UpdateRecord};
