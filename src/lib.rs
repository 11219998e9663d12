//! # chat-client
//!
//! Leptos + WASM chat client for a STOMP-over-WebSocket message broker.
//! Replaces the React `Chat` page with a Rust-native UI layer.
//!
//! This crate contains the chat view component, its state models, the STOMP
//! frame codec, and the connection-lifecycle state machine that drives the
//! browser WebSocket. The broker, the auth module that writes the username,
//! and the hosting application's shell are external collaborators.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
