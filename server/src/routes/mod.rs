//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the QA endpoints and stitches them with Leptos SSR
//! rendering under a single Axum router. The chat page is server-rendered at
//! `/` and hydrated from the `/pkg` assets; every QA call the page makes is
//! relayed to the configured backend.

pub mod proxy;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use session::wire::{ASK_PATH, CONTENT_PATH, DOWNLOAD_PATH, EXTRACT_PATH, HISTORY_PATH};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::HostError;
use crate::state::AppState;

/// QA endpoints plus the health check.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route(EXTRACT_PATH, post(proxy::forward))
        .route(ASK_PATH, post(proxy::forward))
        .route(HISTORY_PATH, get(proxy::forward))
        .route(CONTENT_PATH, get(proxy::forward))
        .route(DOWNLOAD_PATH, get(proxy::forward))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Leptos SSR frontend: QA routes + the chat page + `/pkg` assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[[workspace.metadata.leptos]]` section or `LEPTOS_*` variables).
pub fn leptos_app(state: AppState) -> Result<Router, HostError> {
    let conf = get_configuration(None).map_err(|e| HostError::Leptos(e.to_string()))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
