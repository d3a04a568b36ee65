//! Request/response schema for the QA backend endpoints.
//!
//! Every response shares the `{success, error}` envelope. [`decode`] folds
//! the three failure classes (HTTP status, `success: false`, malformed body)
//! into one [`ApiError`] so both the browser and terminal shells surface
//! failures identically.

#[cfg(test)]
#[path = "wire_test.rs"]
mod wire_test;

use std::fmt;

use serde::de::{self, DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::model::{HistoryEntry, QaPair};

pub const EXTRACT_PATH: &str = "/extract";
pub const ASK_PATH: &str = "/ask";
pub const HISTORY_PATH: &str = "/history";
pub const CONTENT_PATH: &str = "/content";
pub const DOWNLOAD_PATH: &str = "/download";

/// Error surfaced by a remote call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx HTTP status.
    #[error("HTTP error! status: {0}")]
    Status(u16),
    /// The payload reported `success: false`, with the server's reason if any.
    #[error("{}", rejected_reason(.0))]
    Rejected(Option<String>),
    /// The request never produced a response.
    #[error("{0}")]
    Network(String),
    /// The response body was not the expected JSON.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Human-readable reason, using `fallback` when the server gave none.
    #[must_use]
    pub fn reason_or(&self, fallback: &str) -> String {
        match self {
            Self::Rejected(None) => fallback.to_owned(),
            other => other.to_string(),
        }
    }

    /// True when the failure happened below the payload level.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }
}

/// Response body with a `success` flag that unwraps into a typed result.
pub trait Envelope {
    type Output;

    /// Convert the decoded body into the operation result.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] when `success` is false.
    fn into_result(self) -> Result<Self::Output, ApiError>;
}

/// Decode a raw HTTP response into the envelope's output.
///
/// The status is checked before the body is looked at. A non-2xx response
/// whose body is itself a `{success: false, error}` rejection (the host's
/// `502` relay failure) keeps its reason; any other non-2xx is a status error.
///
/// # Errors
///
/// Returns an [`ApiError`] for non-2xx statuses, undecodable bodies, and
/// `success: false` payloads.
pub fn decode<E>(status: u16, body: &str) -> Result<E::Output, ApiError>
where
    E: Envelope + DeserializeOwned,
{
    if !(200..300).contains(&status) {
        return Err(match serde_json::from_str::<Rejection>(body) {
            Ok(Rejection { success: false, error: Some(reason) }) if !reason.is_empty() => {
                ApiError::Rejected(Some(reason))
            }
            _ => ApiError::Status(status),
        });
    }
    let envelope: E = serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    envelope.into_result()
}

/// Failure body carried by a non-2xx response.
#[derive(Deserialize)]
struct Rejection {
    #[serde(default = "default_true")]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

fn default_true() -> bool {
    true
}

fn rejected_reason(reason: &Option<String>) -> &str {
    reason.as_deref().unwrap_or("Unknown error")
}

fn rejected(error: Option<String>) -> ApiError {
    ApiError::Rejected(error.filter(|e| !e.is_empty()))
}

// =============================================================================
// REQUESTS
// =============================================================================

/// Body of `POST /extract`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractRequest {
    pub url: String,
}

/// Body of `POST /ask`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
    pub url: String,
}

// =============================================================================
// RESPONSES
// =============================================================================

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ExtractResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl Envelope for ExtractResponse {
    type Output = ();

    fn into_result(self) -> Result<(), ApiError> {
        if self.success { Ok(()) } else { Err(rejected(self.error)) }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Envelope for AskResponse {
    type Output = String;

    fn into_result(self) -> Result<String, ApiError> {
        if !self.success {
            return Err(rejected(self.error));
        }
        self.answer
            .ok_or_else(|| ApiError::Decode("missing field `answer`".to_owned()))
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub success: bool,
    /// Entries in the order the server listed them.
    #[serde(default, deserialize_with = "ordered_history")]
    pub history: Option<Vec<HistoryEntry>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Envelope for HistoryResponse {
    type Output = Vec<HistoryEntry>;

    fn into_result(self) -> Result<Vec<HistoryEntry>, ApiError> {
        match self.history {
            Some(entries) if self.success => Ok(entries),
            _ => Err(rejected(self.error)),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ContentResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Envelope for ContentResponse {
    type Output = String;

    fn into_result(self) -> Result<String, ApiError> {
        if self.success {
            Ok(self.content.unwrap_or_default())
        } else {
            Err(rejected(self.error))
        }
    }
}

/// Read the `history` object without losing key order.
fn ordered_history<'de, D>(deserializer: D) -> Result<Option<Vec<HistoryEntry>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct HistoryVisitor;

    impl<'de> Visitor<'de> for HistoryVisitor {
        type Value = Option<Vec<HistoryEntry>>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of url to conversation")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, deserializer: D2) -> Result<Self::Value, D2::Error> {
            deserializer.deserialize_map(self)
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((url, conversation)) = map.next_entry::<String, Vec<QaPair>>()? {
                entries.push(HistoryEntry { url, conversation });
            }
            Ok(Some(entries))
        }
    }

    deserializer.deserialize_option(HistoryVisitor)
}
