//! QPU Console Web UI
//!
//! Dashboard and analysis assistant for leased QPU blocks, built with Leptos
//! (WASM).
//!
//! # Features
//!
//! - Summary cards for blocks, workloads and efficiency
//! - Quick-analysis graphs served by the backend
//! - Chat assistant with inline graph replies
//! - Preset optimisation prompts
//!
//! # Architecture
//!
//! Client-side rendered Leptos app. All calls go to the same-origin `/api`
//! prefix, which `qpu-console serve` forwards to the analysis backend.

use leptos::*;

mod api;
mod app;
mod components;
mod format;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
