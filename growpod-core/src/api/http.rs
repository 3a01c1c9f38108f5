//! reqwest-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use super::{ApiRequest, ApiResponse, Method, Transport};
use crate::error::{GrowPodError, GrowPodResult};

/// HTTP transport for a GrowPod server.
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: Url, timeout: Duration) -> GrowPodResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GrowPodError::Config(format!("Could not build HTTP client: {e}")))?;

        Ok(HttpTransport { http, base_url })
    }

    fn url_for(&self, request: &ApiRequest) -> GrowPodResult<Url> {
        let mut url = self
            .base_url
            .join(request.path.trim_start_matches('/'))
            .map_err(|e| GrowPodError::Config(format!("Invalid request path {}: {e}", request.path)))?;

        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }

        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> GrowPodResult<ApiResponse> {
        let url = self.url_for(&request)?;
        debug!(method = %request.method, path = %request.path, "Sending request");

        let builder = match request.method {
            Method::Get => self.http.get(url),
            Method::Post => self.http.post(url),
            Method::Delete => self.http.delete(url),
        };

        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let resp = builder
            .send()
            .await
            .map_err(|e| GrowPodError::Network(e.to_string()))?;

        let status = resp.status();
        // A response arrived; only its body could not be read.
        let body = resp
            .text()
            .await
            .map_err(|e| GrowPodError::Decode(e.to_string()))?;

        Ok(ApiResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}
