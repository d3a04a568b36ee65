//! HTTP client for the QA backend endpoints.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use std::path::Path;
use std::time::Duration;

use reqwest::header::CONTENT_DISPOSITION;
use session::wire::{
    ASK_PATH, AskResponse, CONTENT_PATH, ContentResponse, DOWNLOAD_PATH, EXTRACT_PATH, Envelope,
    ExtractResponse, HISTORY_PATH, HistoryResponse, decode,
};
use session::{ApiError, AskRequest, ExtractRequest, HistoryEntry};

use crate::error::CliError;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// File name used when the server does not suggest one.
pub const DEFAULT_DOWNLOAD_NAME: &str = "website_content.txt";

/// Body and suggested name of a `/download` response.
#[derive(Debug)]
pub struct Download {
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Build a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not http(s) or the HTTP client fails to build.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CliError> {
        let base_url = normalize_base_url(base_url)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;
        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send<E>(&self, request: reqwest::RequestBuilder) -> Result<E::Output, ApiError>
    where
        E: Envelope + serde::de::DeserializeOwned,
    {
        let response = request.send().await.map_err(network)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(network)?;
        decode::<E>(status, &body)
    }

    pub async fn extract(&self, body: &ExtractRequest) -> Result<(), ApiError> {
        tracing::debug!(url = %body.url, "extract");
        self.send::<ExtractResponse>(self.http.post(self.url(EXTRACT_PATH)).json(body))
            .await
    }

    pub async fn ask(&self, body: &AskRequest) -> Result<String, ApiError> {
        tracing::debug!(url = %body.url, "ask");
        self.send::<AskResponse>(self.http.post(self.url(ASK_PATH)).json(body))
            .await
    }

    pub async fn history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        self.send::<HistoryResponse>(self.http.get(self.url(HISTORY_PATH)))
            .await
    }

    pub async fn content(&self) -> Result<String, ApiError> {
        self.send::<ContentResponse>(self.http.get(self.url(CONTENT_PATH)))
            .await
    }

    /// Fetch the extracted content as a file.
    pub async fn download(&self) -> Result<Download, ApiError> {
        let response = self
            .http
            .get(self.url(DOWNLOAD_PATH))
            .send()
            .await
            .map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| DEFAULT_DOWNLOAD_NAME.to_owned());
        let bytes = response.bytes().await.map_err(network)?;
        Ok(Download { filename, bytes: bytes.to_vec() })
    }
}

fn network(err: reqwest::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

/// Validate an http(s) base URL and strip trailing slashes.
///
/// # Errors
///
/// Returns [`CliError::InvalidBaseUrl`] for unparsable or non-http URLs.
pub fn normalize_base_url(raw: &str) -> Result<String, CliError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = reqwest::Url::parse(trimmed)
        .map_err(|e| CliError::InvalidBaseUrl(format!("{raw}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(CliError::InvalidBaseUrl(format!("{raw}: expected http or https")));
    }
    Ok(trimmed.to_owned())
}

/// Extract a bare file name from a `Content-Disposition` header value.
///
/// Directory components are dropped so the server cannot pick the path.
#[must_use]
pub fn filename_from_disposition(value: &str) -> Option<String> {
    let raw = value
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))?
        .trim_matches('"');
    let name = Path::new(raw).file_name()?.to_str()?;
    if name.is_empty() { None } else { Some(name.to_owned()) }
}
