//! `/api` Forwarding
//!
//! Relays web UI calls to the analysis backend so the UI and the API share
//! one origin. Method, query string, content type and body are passed through;
//! the backend's status and body come back verbatim.

use axum::{
    body::{Body, Bytes},
    extract::{Path, RawQuery, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;

use super::error::ServerError;

/// Shared state for the forwarding handler
pub struct ProxyState {
    pub client: reqwest::Client,
    /// Backend base URL without trailing slash
    pub backend_url: String,
}

impl ProxyState {
    pub fn new(client: reqwest::Client, backend_url: &str) -> Self {
        Self {
            client,
            backend_url: backend_url.trim_end_matches('/').to_string(),
        }
    }

    fn target(&self, path: &str, query: Option<&str>) -> String {
        match query.filter(|q| !q.is_empty()) {
            Some(q) => format!("{}/api/{}?{}", self.backend_url, path, q),
            None => format!("{}/api/{}", self.backend_url, path),
        }
    }
}

/// ANY /api/*path
pub async fn forward(
    State(state): State<Arc<ProxyState>>,
    method: Method,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ServerError> {
    let url = state.target(&path, query.as_deref());
    let started = Instant::now();

    let upstream_method = reqwest::Method::from_bytes(method.as_str().as_bytes())
        .map_err(|e| ServerError::BadRequest(e.to_string()))?;

    let mut request = state.client.request(upstream_method, &url);
    if let Some(content_type) = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
        request = request.header("content-type", content_type);
    }
    if !body.is_empty() {
        request = request.body(body.to_vec());
    }

    let upstream = request.send().await.map_err(|e| {
        if e.is_timeout() {
            ServerError::BackendTimeout
        } else {
            ServerError::BackendUnavailable(e.to_string())
        }
    })?;

    let status = StatusCode::from_u16(upstream.status().as_u16())
        .map_err(|e| ServerError::Internal(e.to_string()))?;
    let content_type = upstream
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = upstream
        .bytes()
        .await
        .map_err(|e| ServerError::BackendUnavailable(e.to_string()))?;

    tracing::debug!(
        method = %method,
        path = %path,
        status = status.as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Forwarded API request"
    );

    let mut response = Response::builder().status(status);
    if let Some(content_type) = content_type {
        response = response.header(header::CONTENT_TYPE, content_type);
    }

    response
        .body(Body::from(bytes))
        .map_err(|e| ServerError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_url() {
        let state = ProxyState::new(reqwest::Client::new(), "http://backend:8000/");
        assert_eq!(state.target("summary", None), "http://backend:8000/api/summary");
        assert_eq!(
            state.target("graphs/costs", Some("days=7")),
            "http://backend:8000/api/graphs/costs?days=7"
        );
        assert_eq!(state.target("chat", Some("")), "http://backend:8000/api/chat");
    }
}
