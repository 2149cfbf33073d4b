//! # intel-console
//!
//! Leptos + WASM administration console for the threat-intelligence
//! ingestion platform (sources, providers, ignore lists, users, API tokens,
//! secrets).
//!
//! The `session` module holds the framework-independent core: a persisted
//! reactive cell, bearer-token decoding, and the route authorization guard.
//! Everything else wires that core into Leptos pages and components.

pub mod app;
pub mod components;
pub mod config;
pub mod i18n;
pub mod net;
pub mod pages;
pub mod routes;
pub mod session;
pub mod state;

/// Browser entry point for the hydrate bundle.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
