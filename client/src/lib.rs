//! # client
//!
//! Leptos + WASM frontend for the website chat assistant.
//!
//! This crate contains the page, components, and the browser bindings that
//! execute the effects produced by the `session` controller: REST calls via
//! `gloo-net`, `localStorage`, document theme, focus and scrolling.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
