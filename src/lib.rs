//! # printnparcel-client
//!
//! Leptos + WASM front end for the campus print & parcel marketplace.
//! Students request prints and deliveries, printer owners manage jobs,
//! admins moderate users and printers.
//!
//! The load-bearing piece is the auth/session layer: `state::session` owns
//! the session lifecycle and role switching, `net` is the typed REST
//! boundary, `util::storage` persists the session across reloads, and
//! `components::route_guards` gates routing on the session phase. Pages are
//! thin consumers of that layer.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(App);
}
