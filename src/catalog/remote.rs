//! Remote catalog published as a JSON array over HTTP.

use super::{items_from_json, CatalogError, CatalogSource};
use crate::domain::Item;
use async_trait::async_trait;
use backoff::future::retry;
use backoff::ExponentialBackoff;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct RemoteCatalogSource {
    client: Client,
    url: String,
    max_elapsed: Duration,
}

impl RemoteCatalogSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            max_elapsed: Duration::from_secs(30),
        }
    }

    /// Cap the total time spent retrying transient failures.
    pub fn with_max_elapsed(mut self, max_elapsed: Duration) -> Self {
        self.max_elapsed = max_elapsed;
        self
    }

    async fn get_bytes(&self) -> Result<Vec<u8>, CatalogError> {
        let backoff = ExponentialBackoff {
            max_elapsed_time: Some(self.max_elapsed),
            ..Default::default()
        };

        retry(backoff, || async {
            let response = self
                .client
                .get(&self.url)
                .send()
                .await
                .map_err(|e| backoff::Error::transient(CatalogError::Network(e.to_string())))?;

            let status = response.status();
            if status == 429 || status.is_server_error() {
                debug!(url = %self.url, status = status.as_u16(), "Retrying catalog fetch");
                return Err(backoff::Error::transient(CatalogError::HttpStatus(
                    status.as_u16(),
                )));
            }
            if !status.is_success() {
                return Err(backoff::Error::permanent(CatalogError::HttpStatus(
                    status.as_u16(),
                )));
            }

            response
                .bytes()
                .await
                .map(|b| b.to_vec())
                .map_err(|e| backoff::Error::permanent(CatalogError::Network(e.to_string())))
        })
        .await
    }
}

#[async_trait]
impl CatalogSource for RemoteCatalogSource {
    async fn fetch_items(&self) -> Result<Vec<Item>, CatalogError> {
        let bytes = self.get_bytes().await?;
        items_from_json(&bytes)
    }

    fn describe(&self) -> String {
        format!("remote {}", self.url)
    }
}
