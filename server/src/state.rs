//! Shared application state.
//!
//! `AppState` is injected into Axum handlers via the `State` extractor and
//! holds the QA backend client.

use crate::upstream::Upstream;

#[derive(Clone)]
pub struct AppState {
    pub upstream: Upstream,
}

impl AppState {
    #[must_use]
    pub fn new(upstream: Upstream) -> Self {
        Self { upstream }
    }
}
