//! State Management
//!
//! Global application state: active section and chat transcript.

pub mod global;

pub use global::{provide_global_state, ChatMessage, GlobalState, Section, Sender};
