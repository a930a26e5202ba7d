//! HTTP API Client
//!
//! Functions for communicating with the analysis backend.

use gloo_net::http::{Request, Response};
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use std::collections::HashMap;

/// Same-origin prefix forwarded to the backend by `qpu-console serve`
pub const API_BASE: &str = "/api";

// ============ Request/Response Types ============

/// One completed exchange
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HistoryTurn {
    pub user: String,
    pub assistant: String,
}

impl HistoryTurn {
    pub fn new(user: &str, assistant: &str) -> Self {
        Self {
            user: user.to_string(),
            assistant: assistant.to_string(),
        }
    }
}

#[derive(Debug, serde::Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    history: Vec<HistoryTurn>,
}

#[derive(Debug, serde::Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub graph: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct Summary {
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

/// `null` reads as `0`
fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct EfficiencyRecord {
    /// ISO string or epoch number, as sent
    #[serde(default)]
    pub date: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub cost_per_workload: f64,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub atom_block_ratio: f64,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Quick-analysis graphs rendered by the backend
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphKind {
    Costs,
    Workloads,
    Efficiency,
}

impl GraphKind {
    pub const ALL: [GraphKind; 3] = [GraphKind::Costs, GraphKind::Workloads, GraphKind::Efficiency];

    pub fn as_str(&self) -> &'static str {
        match self {
            GraphKind::Costs => "costs",
            GraphKind::Workloads => "workloads",
            GraphKind::Efficiency => "efficiency",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GraphKind::Costs => "Cost Analysis",
            GraphKind::Workloads => "Workload Analysis",
            GraphKind::Efficiency => "Efficiency Analysis",
        }
    }

    /// Relative URL of the rendered PNG
    pub fn url(&self) -> String {
        format!("{}/graphs/{}", API_BASE, self.as_str())
    }
}

// ============ API Functions ============

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(format!("HTTP {}: {}", response.status(), body));
    }

    response.json().await.map_err(|e| format!("Parse error: {}", e))
}

/// POST /api/chat
pub async fn send_chat(message: &str, history: Vec<HistoryTurn>) -> Result<ChatReply, String> {
    let response = Request::post(&format!("{}/chat", API_BASE))
        .json(&ChatRequest { message, history })
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    read_json(response).await
}

/// GET /api/summary
pub async fn fetch_summary() -> Result<Summary, String> {
    let response = Request::get(&format!("{}/summary", API_BASE))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    read_json(response).await
}

/// GET /api/efficiency
pub async fn fetch_efficiency() -> Result<Vec<EfficiencyRecord>, String> {
    let response = Request::get(&format!("{}/efficiency", API_BASE))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    read_json(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_urls_are_relative() {
        assert_eq!(GraphKind::Costs.url(), "/api/graphs/costs");
        assert_eq!(GraphKind::Efficiency.url(), "/api/graphs/efficiency");
    }

    #[test]
    fn test_summary_missing_fields() {
        let summary: Summary = serde_json::from_str(r#"{"total_blocks_leased": 4}"#).unwrap();
        assert_eq!(summary.total_blocks_leased, Some(4.0));
        assert_eq!(summary.atom_blocks, None);
    }

    #[test]
    fn test_chat_request_shape() {
        let body = serde_json::to_value(ChatRequest {
            message: "hi",
            history: vec![HistoryTurn::new("a", "b")],
        })
        .unwrap();
        assert_eq!(body["history"][0]["assistant"], "b");
    }

    #[test]
    fn test_efficiency_lenient_fields() {
        let records: Vec<EfficiencyRecord> = serde_json::from_str(
            r#"[{"date": 1704067200000, "cost_per_workload": null, "atom_block_ratio": 0.25},
                {"cost_per_workload": 1.5, "atom_block_ratio": null}]"#,
        )
        .unwrap();

        assert_eq!(records[0].date, Some(serde_json::json!(1704067200000_i64)));
        assert_eq!(records[0].cost_per_workload, 0.0);
        assert_eq!(records[0].atom_block_ratio, 0.25);
        assert_eq!(records[1].date, None);
        assert_eq!(records[1].atom_block_ratio, 0.0);
    }
}
