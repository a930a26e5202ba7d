//! Global Application State
//!
//! Reactive state shared by the sidebar and the three sections.

use leptos::*;
use serde::{Deserialize, Serialize};

use crate::api::{self, HistoryTurn};

/// Shown in place of a reply whenever an exchange fails
pub const CHAT_ERROR_MESSAGE: &str =
    "Sorry, there was an error processing your request. Please try again.";

/// Greeting shown while the transcript is empty
pub const WELCOME_MESSAGE: &str = "Hello! How can I help you with QPU analysis today?";

/// Suggestion chips under the welcome message
pub const SUGGESTIONS: [&str; 3] = [
    "Tell me the top 10 most active QPU blocks",
    "What will happen to the cost if I only use Atom blocks?",
    "Generate a graph to show the trend of daily costs",
];

/// Top-level sections; exactly one is visible
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Charts,
    Optimisation,
    Assistant,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Charts, Section::Optimisation, Section::Assistant];

    /// DOM id of the section element
    pub fn id(&self) -> &'static str {
        match self {
            Section::Charts => "charts-section",
            Section::Optimisation => "optimisation-section",
            Section::Assistant => "assistant-section",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Charts => "Charts",
            Section::Optimisation => "Optimisation",
            Section::Assistant => "TeraOps Assistant",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Section::Charts => "📊",
            Section::Optimisation => "⚙️",
            Section::Assistant => "💬",
        }
    }
}

/// Who wrote a message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// A single transcript entry
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    /// Base64 PNG attached to a bot reply
    pub graph: Option<String>,
    pub is_error: bool,
    /// Local time the message was added, `HH:MM`
    pub time: String,
}

impl ChatMessage {
    fn new(id: u64, text: String, sender: Sender) -> Self {
        Self {
            id,
            text,
            sender,
            graph: None,
            is_error: false,
            time: chrono::Local::now().format("%H:%M").to_string(),
        }
    }

    pub fn user(id: u64, text: String) -> Self {
        Self::new(id, text, Sender::User)
    }

    pub fn bot(id: u64, text: String, graph: Option<String>) -> Self {
        Self {
            graph: graph.filter(|g| !g.is_empty()),
            ..Self::new(id, text, Sender::Bot)
        }
    }

    pub fn error(id: u64) -> Self {
        Self {
            is_error: true,
            ..Self::new(id, CHAT_ERROR_MESSAGE.to_string(), Sender::Bot)
        }
    }
}

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Section currently shown
    pub active_section: RwSignal<Section>,
    /// Chat transcript, oldest first
    pub messages: RwSignal<Vec<ChatMessage>>,
    /// Completed exchanges sent back as context
    pub history: RwSignal<Vec<HistoryTurn>>,
    /// A chat request is in flight
    pub chat_loading: RwSignal<bool>,
    next_id: RwSignal<u64>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        active_section: create_rw_signal(Section::Charts),
        messages: create_rw_signal(Vec::new()),
        history: create_rw_signal(Vec::new()),
        chat_loading: create_rw_signal(false),
        next_id: create_rw_signal(1),
    };

    provide_context(state);
}

/// Message as typed if it may be sent now; whitespace-only input is refused
pub fn accept_input(text: &str, loading: bool) -> Option<String> {
    if text.trim().is_empty() || loading {
        None
    } else {
        Some(text.to_string())
    }
}

impl GlobalState {
    pub fn show(&self, section: Section) {
        self.active_section.set(section);
    }

    fn take_id(&self) -> u64 {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        id
    }

    fn push(&self, message: ChatMessage) {
        self.messages.update(|messages| messages.push(message));
    }

    /// Send a chat message; ignored while empty or while a reply is pending
    ///
    /// Returns whether the message was sent.
    pub fn send_message(&self, text: &str) -> bool {
        let Some(text) = accept_input(text, self.chat_loading.get_untracked()) else {
            return false;
        };

        let history = self.history.get_untracked();
        let user_id = self.take_id();
        self.push(ChatMessage::user(user_id, text.clone()));
        self.chat_loading.set(true);

        let state = *self;
        spawn_local(async move {
            match api::send_chat(&text, history).await {
                Ok(reply) => {
                    let id = state.take_id();
                    state
                        .history
                        .update(|h| h.push(HistoryTurn::new(&text, &reply.response)));
                    state.push(ChatMessage::bot(id, reply.response, reply.graph));
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Chat request failed: {}", e).into());
                    let id = state.take_id();
                    state.push(ChatMessage::error(id));
                }
            }
            state.chat_loading.set(false);
        });

        true
    }

    /// Switch to the assistant and send
    pub fn ask(&self, text: &str) {
        self.show(Section::Assistant);
        self.send_message(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_input() {
        assert_eq!(accept_input("  hi  ", false), Some("  hi  ".to_string()));
        assert_eq!(accept_input("   ", false), None);
        assert_eq!(accept_input("hi", true), None);
    }

    #[test]
    fn test_section_ids() {
        let ids: Vec<&str> = Section::ALL.iter().map(|s| s.id()).collect();
        assert_eq!(ids, ["charts-section", "optimisation-section", "assistant-section"]);
    }

    #[test]
    fn test_error_message() {
        let msg = ChatMessage::error(3);
        assert!(msg.is_error);
        assert_eq!(msg.sender, Sender::Bot);
        assert_eq!(msg.text, CHAT_ERROR_MESSAGE);
    }

    #[test]
    fn test_bot_drops_empty_graph() {
        assert_eq!(ChatMessage::bot(1, "ok".to_string(), Some(String::new())).graph, None);
    }
}
