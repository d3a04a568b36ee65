//! REST API helpers for communicating with the QA backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error since these endpoints are only
//! meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call resolves to `Result<_, ApiError>`: network failures, non-2xx
//! statuses, undecodable bodies, and `success: false` payloads all become an
//! error the controller renders into the transcript.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use session::wire::DOWNLOAD_PATH;
use session::{ApiError, AskRequest, ExtractRequest, HistoryEntry};
#[cfg(feature = "hydrate")]
use session::wire::{
    ASK_PATH, AskResponse, CONTENT_PATH, ContentResponse, EXTRACT_PATH, Envelope, ExtractResponse,
    HISTORY_PATH, HistoryResponse,
};

#[cfg(any(test, not(feature = "hydrate")))]
fn unavailable() -> ApiError {
    ApiError::Network("not available on server".to_owned())
}

#[cfg(feature = "hydrate")]
fn network(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

/// Send `request` and decode the `{success, ...}` envelope.
#[cfg(feature = "hydrate")]
async fn send<E>(request: gloo_net::http::Request) -> Result<E::Output, ApiError>
where
    E: Envelope + serde::de::DeserializeOwned,
{
    let resp = request.send().await.map_err(network)?;
    let status = resp.status();
    let body = resp.text().await.map_err(network)?;
    session::wire::decode::<E>(status, &body)
}

/// Ask the backend to fetch and index a website via `POST /extract`.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the backend rejects the URL.
pub async fn extract(body: &ExtractRequest) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let request = gloo_net::http::Request::post(EXTRACT_PATH)
            .json(body)
            .map_err(network)?;
        send::<ExtractResponse>(request).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = body;
        Err(unavailable())
    }
}

/// Ask a question about the extracted website via `POST /ask`.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the backend cannot answer.
pub async fn ask(body: &AskRequest) -> Result<String, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let request = gloo_net::http::Request::post(ASK_PATH)
            .json(body)
            .map_err(network)?;
        send::<AskResponse>(request).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = body;
        Err(unavailable())
    }
}

/// Fetch every processed website and its conversation from `/history`.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the backend reports no history.
pub async fn fetch_history() -> Result<Vec<HistoryEntry>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let request = gloo_net::http::Request::get(HISTORY_PATH)
            .build()
            .map_err(network)?;
        send::<HistoryResponse>(request).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(unavailable())
    }
}

/// Fetch the raw extracted text of the current website from `/content`.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or nothing was extracted.
pub async fn fetch_content() -> Result<String, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let request = gloo_net::http::Request::get(CONTENT_PATH)
            .build()
            .map_err(network)?;
        send::<ContentResponse>(request).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(unavailable())
    }
}

/// Path the browser navigates to for the content download.
#[must_use]
pub fn download_href() -> &'static str {
    DOWNLOAD_PATH
}

/// Navigate to `/download`; the browser handles the file.
pub fn start_download() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(w) = web_sys::window() {
            if w.location().set_href(download_href()).is_err() {
                log::error!("navigation to {} failed", download_href());
            }
        }
    }
}
