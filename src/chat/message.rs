//! Chat Messages
//!
//! Transcript entries and the fixed strings the chat surface shows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shown in place of a reply whenever an exchange fails
pub const CHAT_ERROR_MESSAGE: &str =
    "Sorry, there was an error processing your request. Please try again.";

/// Greeting shown while the transcript is empty
pub const WELCOME_MESSAGE: &str = "Hello! How can I help you with QPU analysis today?";

/// Suggestion chips offered under the welcome message
pub const SUGGESTIONS: [&str; 3] = [
    "Tell me the top 10 most active QPU blocks",
    "What will happen to the cost if I only use Atom blocks?",
    "Generate a graph to show the trend of daily costs",
];

/// Preset prompts behind the optimisation tool buttons
pub const OPTIMISATION_PROMPTS: [(&str, &str); 3] = [
    (
        "Block Mix",
        "How would costs change if we moved to an 80% Atom block mix?",
    ),
    (
        "Batch Scheduling",
        "Simulate batching workloads into 3-day windows and show the savings.",
    ),
    (
        "Cost Negotiation",
        "What would a 10% lease cost reduction save us overall?",
    ),
];

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// A single transcript entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique within the session, increasing
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    /// Base64 PNG attached to a bot reply
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<String>,
    #[serde(default)]
    pub is_error: bool,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::User,
            graph: None,
            is_error: false,
            created_at: Utc::now(),
        }
    }

    pub fn bot(id: u64, text: impl Into<String>, graph: Option<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::Bot,
            graph: graph.filter(|g| !g.is_empty()),
            is_error: false,
            created_at: Utc::now(),
        }
    }

    /// The fixed bot-styled error entry
    pub fn error(id: u64) -> Self {
        Self {
            is_error: true,
            ..Self::bot(id, CHAT_ERROR_MESSAGE, None)
        }
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    pub fn has_graph(&self) -> bool {
        self.graph.is_some()
    }
}
