//! HTTP client for the QA backend.
//!
//! DESIGN
//! ======
//! The host does not interpret QA payloads. Requests are replayed against
//! the backend with their method, body, and content type, and the backend's
//! status, body, and the headers the browser depends on come back verbatim.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};

use crate::config::{HostConfig, Timeouts};
use crate::error::HostError;

/// Response headers copied back to the browser.
const FORWARDED_HEADERS: [HeaderName; 2] = [CONTENT_TYPE, CONTENT_DISPOSITION];

/// Buffered backend response.
#[derive(Debug)]
pub struct Relayed {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Clone)]
pub struct Upstream {
    http: reqwest::Client,
    base_url: Arc<str>,
}

impl Upstream {
    /// Build the backend client from host config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &HostConfig) -> Result<Self, HostError> {
        Self::with_timeouts(&config.backend_url, config.timeouts)
    }

    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_timeouts(base_url: &str, timeouts: Timeouts) -> Result<Self, HostError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| HostError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: Arc::from(base_url.trim_end_matches('/')) })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replay one request against `path` on the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or the body cannot be read.
    pub async fn relay(
        &self,
        method: Method,
        path: &str,
        content_type: Option<&HeaderValue>,
        body: Bytes,
    ) -> Result<Relayed, HostError> {
        let mut request = self.http.request(method, format!("{}{path}", self.base_url));
        if let Some(content_type) = content_type {
            request = request.header(CONTENT_TYPE, content_type.clone());
        }
        if !body.is_empty() {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let mut headers = HeaderMap::new();
        for name in FORWARDED_HEADERS {
            if let Some(value) = response.headers().get(&name) {
                headers.insert(name, value.clone());
            }
        }
        let body = response.bytes().await?;
        Ok(Relayed { status, headers, body })
    }
}
