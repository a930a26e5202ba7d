//! # QPU Console
//!
//! Client for a QPU usage analysis service: a dashboard of leased blocks and
//! workload efficiency, a conversational assistant that can answer with
//! graphs, and preset optimisation prompts.
//!
//! ## Modules
//!
//! - [`backend`]: HTTP client for the analysis service
//! - [`chat`]: Transcript, history and the single in-flight request rule
//! - [`dashboard`]: Summary and efficiency loading, card building
//! - [`sections`]: Charts / Optimisation / Assistant switching
//! - [`console`]: Interactive terminal front-end
//! - [`server`]: Host for the web UI with same-origin `/api` forwarding
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use qpu_console::backend::{BackendClient, BackendConfig};
//! use qpu_console::chat::ChatSession;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = Arc::new(BackendClient::new(BackendConfig::default())?);
//!     let session = ChatSession::new(backend);
//!
//!     let outcome = session.send("What will happen to the cost if I only use Atom blocks?").await;
//!     if let Some(message) = outcome.message() {
//!         println!("{}", message.text);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod chat;
pub mod config;
pub mod console;
pub mod dashboard;
pub mod graphs;
pub mod logging;
pub mod render;
pub mod sections;
pub mod server;

pub use backend::{
    AnalysisBackend, BackendClient, BackendConfig, ChatReply, ChatRequest, ClientError,
    EfficiencyRecord, HistoryTurn, SummarySnapshot, WorkloadRecord,
};

pub use chat::{ChatMessage, ChatSession, RejectReason, Sender, SendOutcome};

pub use config::{Config, ConfigError};

pub use console::{Command, Console, ConsoleError};

pub use dashboard::{build_cards, DashboardCard, DashboardData, DashboardLoader, DashboardState};

pub use graphs::{GraphError, GraphKind};

pub use sections::{Section, SectionSwitcher};

pub use server::{build_router, serve, ServerError};
