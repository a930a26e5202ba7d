//! Pages
//!
//! Top-level view for each section.

pub mod chat;
pub mod dashboard;
pub mod optimisation;

pub use chat::ChatInterface;
pub use dashboard::Dashboard;
pub use optimisation::Optimisation;
