//! # Generation API Client
//!
//! This module provides the transport used by the request handler: a trait for
//! anything that can turn a `RequestPayload` into a `ResultPayload`, and the
//! HTTP implementation that talks to the remote generation service.

use crate::config::ClientConfig;
use crate::errors::GenerateError;
use crate::types::{HealthStatus, RequestPayload, ResultPayload};
use async_trait::async_trait;
use dyn_clone::DynClone;
use reqwest::{Client as ReqwestClient, Response};
use std::fmt::Debug;
use tracing::{debug, info};
use url::Url;

/// A backend capable of running one generation request.
#[async_trait]
pub trait GenerationBackend: Send + Sync + Debug + DynClone {
    /// Sends the payload and returns the service's JSON response verbatim.
    async fn generate(&self, payload: &RequestPayload) -> Result<ResultPayload, GenerateError>;
}

dyn_clone::clone_trait_object!(GenerationBackend);

/// The HTTP client for the generation service.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: ReqwestClient,
    generate_url: Url,
    health_url: Url,
}

impl ApiClient {
    /// Creates a new `ApiClient`. The endpoint URLs are resolved here, once.
    pub fn new(config: &ClientConfig) -> Result<Self, GenerateError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(GenerateError::ClientBuild)?;
        Ok(Self {
            client,
            generate_url: config.generate_url()?,
            health_url: config.health_url()?,
        })
    }

    pub fn generate_url(&self) -> &Url {
        &self.generate_url
    }

    /// Calls the service's liveness route at the origin root.
    pub async fn health(&self) -> Result<HealthStatus, GenerateError> {
        info!("Checking service health at: {}", self.health_url);
        let response = self.client.get(self.health_url.clone()).send().await?;
        let bytes = ensure_success(response).await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Passes a 2xx response through, or turns it into a `Status` error carrying
/// the server's error text.
async fn ensure_success(response: Response) -> Result<Response, GenerateError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(GenerateError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response)
}

#[async_trait]
impl GenerationBackend for ApiClient {
    async fn generate(&self, payload: &RequestPayload) -> Result<ResultPayload, GenerateError> {
        info!("Sending generation request to: {}", self.generate_url);

        // `.json()` sets `Content-Type: application/json`.
        let response = self
            .client
            .post(self.generate_url.clone())
            .json(payload)
            .send()
            .await?;

        let bytes = ensure_success(response).await?.bytes().await?;
        let value: serde_json::Value = serde_json::from_slice(&bytes)?;
        debug!("Generation response received ({} bytes).", bytes.len());
        Ok(ResultPayload::new(value))
    }
}
