//! HTTP fact providers
//!
//! Two public endpoints with different response shapes: the cat endpoint
//! returns one fact per call, the dog endpoint returns a batch with the text
//! nested under `attributes.body`.

use crate::config::ProvidersConfig;
use crate::error::{Error, Result};
use crate::fetch::FactProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Build the shared HTTP client from provider configuration
pub fn build_client(config: &ProvidersConfig) -> Result<Client> {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
        .map_err(|e| Error::Provider(format!("Failed to create HTTP client: {}", e)))
}

#[derive(Debug, Deserialize)]
struct CatFactResponse {
    fact: String,
}

/// Provider for the single-fact cat endpoint
pub struct CatFactProvider {
    client: Client,
    url: String,
}

impl CatFactProvider {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn from_config(config: &ProvidersConfig) -> Result<Self> {
        Ok(Self::new(build_client(config)?, config.cat_url.clone()))
    }
}

#[async_trait]
impl FactProvider for CatFactProvider {
    async fn fetch(&self) -> Result<Vec<String>> {
        debug!("Fetching cat fact from {}", self.url);

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Provider(format!(
                "HTTP {} from cat fact endpoint",
                status
            )));
        }

        let body: CatFactResponse = response.json().await?;
        Ok(vec![body.fact])
    }
}

#[derive(Debug, Deserialize)]
struct DogFactsResponse {
    #[serde(default)]
    data: Vec<DogFactEntry>,
}

#[derive(Debug, Deserialize)]
struct DogFactEntry {
    #[serde(default)]
    attributes: Option<DogFactAttributes>,
}

#[derive(Debug, Deserialize)]
struct DogFactAttributes {
    #[serde(default)]
    body: Option<String>,
}

/// Provider for the batched dog endpoint
pub struct DogFactProvider {
    client: Client,
    url: String,
    batch_size: u32,
}

impl DogFactProvider {
    pub fn new(client: Client, url: impl Into<String>, batch_size: u32) -> Self {
        Self {
            client,
            url: url.into(),
            batch_size,
        }
    }

    pub fn from_config(config: &ProvidersConfig) -> Result<Self> {
        Ok(Self::new(
            build_client(config)?,
            config.dog_url.clone(),
            config.dog_batch_size,
        ))
    }
}

#[async_trait]
impl FactProvider for DogFactProvider {
    async fn fetch(&self) -> Result<Vec<String>> {
        debug!("Fetching {} dog facts from {}", self.batch_size, self.url);

        let response = self
            .client
            .get(&self.url)
            .query(&[("limit", self.batch_size)])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Provider(format!(
                "HTTP {} from dog fact endpoint",
                status
            )));
        }

        let body: DogFactsResponse = response.json().await?;

        // Entries without a usable attributes.body are skipped, not errors
        Ok(body
            .data
            .into_iter()
            .filter_map(|entry| entry.attributes.and_then(|a| a.body))
            .collect())
    }
}
