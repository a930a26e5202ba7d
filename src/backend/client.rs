//! Analysis Backend HTTP Client
//!
//! reqwest client for the backend's `/api` endpoints.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use thiserror::Error;

use super::dto::{ChatReply, ChatRequest, EfficiencyRecord, SummarySnapshot, WorkloadRecord};
use super::AnalysisBackend;
use crate::graphs::GraphKind;

/// HTTP client for the analysis backend
pub struct BackendClient {
    client: Client,
    config: BackendConfig,
}

/// Configuration for the backend client
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the backend (e.g., "http://localhost:8000")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Value for the optional `use_agent` flag on chat requests
    pub use_agent: Option<bool>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout_ms: 60_000,
            use_agent: None,
        }
    }
}

impl BackendClient {
    /// Create a new client with the given configuration
    pub fn new(config: BackendConfig) -> Result<Self, ClientError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(config.base_url));
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            client,
            config: BackendConfig { base_url, ..config },
        })
    }

    /// Get the current configuration
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.config.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.endpoint(path);
        let started = Instant::now();

        let response = self.client.get(&url).send().await.map_err(classify)?;
        let response = check_status(response, path, started).await?;

        decode(response).await
    }

    async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ClientError> {
        let url = self.endpoint(path);
        let started = Instant::now();

        let response = self.client.get(&url).send().await.map_err(classify)?;
        let response = check_status(response, path, started).await?;

        let bytes = response.bytes().await.map_err(classify)?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl AnalysisBackend for BackendClient {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ClientError> {
        let url = self.endpoint("chat");
        let started = Instant::now();

        let mut body = request.clone();
        if body.use_agent.is_none() {
            body.use_agent = self.config.use_agent;
        }

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(classify)?;
        let response = check_status(response, "chat", started).await?;

        decode(response).await
    }

    async fn summary(&self) -> Result<SummarySnapshot, ClientError> {
        self.get_json("summary").await
    }

    async fn efficiency(&self) -> Result<Vec<EfficiencyRecord>, ClientError> {
        self.get_json("efficiency").await
    }

    async fn daily_workloads(&self) -> Result<Vec<WorkloadRecord>, ClientError> {
        self.get_json("daily_workloads").await
    }

    async fn graph(&self, kind: GraphKind) -> Result<Vec<u8>, ClientError> {
        self.get_bytes(&format!("graphs/{}", kind.as_str())).await
    }

    fn graph_url(&self, kind: GraphKind) -> String {
        kind.url(&self.config.base_url)
    }
}

/// Map a transport error onto the client error kinds
fn classify(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout
    } else if e.is_connect() {
        ClientError::Unavailable
    } else if e.is_decode() {
        ClientError::Decode(e.to_string())
    } else {
        ClientError::Request(e)
    }
}

async fn check_status(
    response: Response,
    endpoint: &str,
    started: Instant,
) -> Result<Response, ClientError> {
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_success() {
        tracing::debug!(endpoint, status = status.as_u16(), elapsed_ms, "Backend request completed");
        Ok(response)
    } else {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(endpoint, status = status.as_u16(), elapsed_ms, "Backend returned an error status");
        Err(ClientError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let text = response.text().await.map_err(classify)?;
    serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
}

// ============================================
// Errors
// ============================================

/// Errors that can occur when talking to the backend
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Backend unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Backend error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
}
