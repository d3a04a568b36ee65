//! Forwarding handlers for the QA endpoints.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::error::HostError;
use crate::state::AppState;

/// Relay the request to the same path on the QA backend.
///
/// Backend failures become `502` with a `{success:false, error}` body so the
/// browser renders them like any rejected payload.
pub async fn forward(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path();
    match state
        .upstream
        .relay(method.clone(), path, headers.get(CONTENT_TYPE), body)
        .await
    {
        Ok(relayed) => {
            tracing::debug!(%method, path, status = relayed.status.as_u16(), "relayed");
            (relayed.status, relayed.headers, relayed.body).into_response()
        }
        Err(e) => {
            tracing::error!(%method, path, error = %e, "QA backend request failed");
            bad_gateway(&e)
        }
    }
}

fn bad_gateway(err: &HostError) -> Response {
    let body = json!({ "success": false, "error": format!("Backend unavailable: {err}") });
    (StatusCode::BAD_GATEWAY, Json(body)).into_response()
}
