pub mod alphavantage;
pub mod broker;

#[cfg(test)]
pub mod mock;

use std::time::Duration;

use reqwest::Client;

use crate::error::AppError;

/// Build the HTTP client shared by the provider and broker clients.
///
/// `timeout` of `None` keeps reqwest's default of no overall timeout.
pub fn build_http_client(timeout: Option<Duration>) -> Result<Client, AppError> {
    let mut builder = Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));

    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|err| AppError::Network(err.to_string()))
}
