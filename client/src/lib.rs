//! # client
//!
//! Leptos + WASM frontend for CareBridge.
//!
//! This crate wires the `session` core into the browser: a `localStorage`
//! backend for the durable session record, the auth context shared by every
//! page, the route guards, and the login / register / dashboard screens.

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
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
