//! Clinica Dashboard
//!
//! Admin dashboard for clinical records built with Leptos (WASM).
//!
//! # Architecture
//!
//! Client-side rendered app. Every URL goes through one shell that resolves it
//! against the `clinica` route table and renders the page inside the shared layout
//! or on its own. All backend calls go through a single `ApiClient` provided as
//! context, which attaches the bearer token kept in `localStorage`.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
