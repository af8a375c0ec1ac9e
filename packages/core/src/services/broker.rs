//! Broker delivery.
//!
//! POSTs each [`UpdateRecord`] as JSON to the downstream receiver. One
//! request per record; the response body is never read.

use async_trait::async_trait;
use reqwest::{header, Client};

use crate::relay::{error::PublishError, provider::UpdatePublisher, types::UpdateRecord};

#[derive(Clone)]
pub struct BrokerClient {
    url: String,
    http: Client,
}

impl BrokerClient {
    pub fn new(url: impl Into<String>, http: Client) -> Self {
        Self {
            url: url.into(),
            http,
        }
    }

    pub async fn send_update(&self, record: &UpdateRecord) -> Result<(), PublishError> {
        let body =
            serde_json::to_vec(record).map_err(|source| PublishError::Serialize { source })?;

        let response = self
            .http
            .post(&self.url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|source| PublishError::Transport { source })?;

        if !response.status().is_success() {
            return Err(PublishError::HttpStatus {
                status: response.status().as_u16(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl UpdatePublisher for BrokerClient {
    async fn publish(&self, record: &UpdateRecord) -> Result<(), PublishError> {
        self.send_update(record).await
    }

    fn destination(&self) -> &str {
        &self.url
    }
}
