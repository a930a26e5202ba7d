//! Wire Types
//!
//! Request and response bodies exchanged with the analysis backend.
//! Every summary field is optional on the wire; a missing value renders as `0`.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// `null` or a missing number reads as `0`
fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// Dates arrive as ISO strings or epoch numbers
fn date_label(date: &serde_json::Value) -> String {
    match date {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============================================
// CHAT DTOs
// ============================================

/// One completed exchange, sent back as conversation context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryTurn {
    /// What the user asked
    pub user: String,
    /// What the assistant answered
    pub assistant: String,
}

impl HistoryTurn {
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            assistant: assistant.into(),
        }
    }
}

/// POST /api/chat request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Message typed by the user
    pub message: String,
    /// Prior completed turns, oldest first
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
    /// Ask the backend to route through its agent (omitted unless configured)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_agent: Option<bool>,
}

/// POST /api/chat response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Assistant text, may contain real or escaped line breaks
    pub response: String,
    /// Optional base64-encoded PNG
    #[serde(default)]
    pub graph: Option<String>,
}

// ============================================
// DASHBOARD DTOs
// ============================================

/// GET /api/summary response body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummarySnapshot {
    #[serde(default)]
    pub total_blocks_leased: Option<f64>,
    #[serde(default)]
    pub atom_blocks: Option<f64>,
    #[serde(default)]
    pub photon_blocks: Option<f64>,
    #[serde(default)]
    pub spin_blocks: Option<f64>,
    #[serde(default)]
    pub total_workloads: Option<f64>,
    #[serde(default)]
    pub avg_workloads_per_block: Option<f64>,
    #[serde(default)]
    pub avg_daily_workloads: Option<f64>,
}

/// One element of GET /api/efficiency
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyRecord {
    /// Day the record covers, as sent
    #[serde(default)]
    pub date: Option<serde_json::Value>,
    /// Total cost divided by workloads executed that day
    #[serde(default, deserialize_with = "null_as_zero")]
    pub cost_per_workload: f64,
    /// Share of leased blocks that were Atom blocks (0.0 - 1.0)
    #[serde(default, deserialize_with = "null_as_zero")]
    pub atom_block_ratio: f64,
    /// Any further per-day fields the backend includes
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl EfficiencyRecord {
    pub fn new(cost_per_workload: f64, atom_block_ratio: f64) -> Self {
        Self {
            cost_per_workload,
            atom_block_ratio,
            ..Default::default()
        }
    }
}

/// One element of GET /api/daily_workloads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkloadRecord {
    #[serde(default)]
    pub date: Option<serde_json::Value>,
    #[serde(default)]
    pub workloads: Option<f64>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl WorkloadRecord {
    /// Date for display, `-` when absent
    pub fn date_label(&self) -> String {
        self.date.as_ref().map(date_label).unwrap_or_else(|| "-".to_string())
    }
}
