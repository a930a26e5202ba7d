//! Backend API
//!
//! Typed calls to the analysis backend through the same-origin `/api` prefix.

mod client;

pub use client::*;
