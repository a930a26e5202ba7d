//! Analysis Backend
//!
//! Everything the console knows about the external analysis service.
//!
//! ## Endpoints
//!
//! - `POST /api/chat` - Ask the assistant, with prior turns as context
//! - `GET /api/summary` - Block and workload totals
//! - `GET /api/efficiency` - Per-day efficiency records
//! - `GET /api/daily_workloads` - Per-day workload counts
//! - `GET /api/graphs/{kind}` - Rendered PNG graphs

mod client;
mod dto;

#[cfg(test)]
pub(crate) mod mock;

pub use client::{BackendClient, BackendConfig, ClientError};
pub use dto::{
    ChatReply, ChatRequest, EfficiencyRecord, HistoryTurn, SummarySnapshot, WorkloadRecord,
};

use async_trait::async_trait;

use crate::graphs::GraphKind;

/// Seam between the view models and the network
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Send one chat message
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ClientError>;

    /// Fetch the summary snapshot
    async fn summary(&self) -> Result<SummarySnapshot, ClientError>;

    /// Fetch efficiency records, oldest first
    async fn efficiency(&self) -> Result<Vec<EfficiencyRecord>, ClientError>;

    /// Fetch daily workload records, oldest first
    async fn daily_workloads(&self) -> Result<Vec<WorkloadRecord>, ClientError>;

    /// Download a rendered graph
    async fn graph(&self, kind: GraphKind) -> Result<Vec<u8>, ClientError>;

    /// Where the graph lives, for opening in a browser
    fn graph_url(&self, kind: GraphKind) -> String;
}
