//! Chat Session
//!
//! Owns the transcript and the conversation history for one session and
//! enforces a single outstanding request. A second `send` while a request is
//! in flight is dropped, not queued.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::message::{ChatMessage, SUGGESTIONS};
use crate::backend::{AnalysisBackend, ChatRequest, HistoryTurn};

/// Why a send was not attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Input was empty or whitespace only
    Empty,
    /// Another request is still outstanding
    Busy,
}

/// Result of a call to [`ChatSession::send`]
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Nothing was sent and nothing was appended
    Rejected(RejectReason),
    /// The assistant replied; carries the appended bot message
    Replied(ChatMessage),
    /// The exchange failed; carries the appended error message
    Failed(ChatMessage),
}

impl SendOutcome {
    /// The bot-side message appended by this send, if any
    pub fn message(&self) -> Option<&ChatMessage> {
        match self {
            SendOutcome::Replied(msg) | SendOutcome::Failed(msg) => Some(msg),
            SendOutcome::Rejected(_) => None,
        }
    }
}

#[derive(Default)]
struct Transcript {
    messages: Vec<ChatMessage>,
    history: Vec<HistoryTurn>,
}

/// One chat conversation against the analysis backend
pub struct ChatSession {
    backend: Arc<dyn AnalysisBackend>,
    transcript: RwLock<Transcript>,
    in_flight: AtomicBool,
    next_id: AtomicU64,
}

/// Clears the in-flight flag however the request ends
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ChatSession {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self {
            backend,
            transcript: RwLock::new(Transcript::default()),
            in_flight: AtomicBool::new(false),
            next_id: AtomicU64::new(1),
        }
    }

    /// Submit a message typed by the user
    pub async fn send(&self, text: &str) -> SendOutcome {
        if text.trim().is_empty() {
            return SendOutcome::Rejected(RejectReason::Empty);
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Chat request already in flight, ignoring send");
            return SendOutcome::Rejected(RejectReason::Busy);
        }
        let _guard = InFlight(&self.in_flight);

        let request = {
            let mut transcript = self.transcript.write().await;
            transcript.messages.push(ChatMessage::user(self.next_id(), text));
            ChatRequest {
                message: text.to_string(),
                history: transcript.history.clone(),
                use_agent: None,
            }
        };

        tracing::info!(
            message_len = text.len(),
            history_turns = request.history.len(),
            "Sending chat message"
        );

        let result = self.backend.chat(&request).await;

        let mut transcript = self.transcript.write().await;
        match result {
            Ok(reply) => {
                let message = ChatMessage::bot(self.next_id(), reply.response.clone(), reply.graph);
                transcript.messages.push(message.clone());
                transcript
                    .history
                    .push(HistoryTurn::new(text, reply.response));

                tracing::info!(has_graph = message.has_graph(), "Chat reply received");
                SendOutcome::Replied(message)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Chat request failed");
                let message = ChatMessage::error(self.next_id());
                transcript.messages.push(message.clone());
                SendOutcome::Failed(message)
            }
        }
    }

    /// Send one of the welcome suggestions by index
    pub async fn send_suggestion(&self, index: usize) -> Option<SendOutcome> {
        let suggestion = SUGGESTIONS.get(index)?;
        Some(self.send(suggestion).await)
    }

    /// Whether a request is outstanding (drives the loading indicator)
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Whether the welcome panel should be shown
    pub async fn welcome_visible(&self) -> bool {
        self.transcript.read().await.messages.is_empty()
    }

    /// Snapshot of the transcript, oldest first
    pub async fn transcript(&self) -> Vec<ChatMessage> {
        self.transcript.read().await.messages.clone()
    }

    /// Snapshot of completed turns, oldest first
    pub async fn history(&self) -> Vec<HistoryTurn> {
        self.transcript.read().await.history.clone()
    }

    /// Suggestion prompts for the welcome panel
    pub fn suggestions(&self) -> &'static [&'static str] {
        &SUGGESTIONS
    }

    /// Forget the conversation
    ///
    /// Refused while a reply is pending, so the outstanding exchange lands
    /// whole. Returns whether the transcript was cleared.
    pub async fn clear(&self) -> bool {
        let mut transcript = self.transcript.write().await;
        if self.in_flight.load(Ordering::Acquire) {
            tracing::debug!("Chat request in flight, not clearing");
            return false;
        }
        transcript.messages.clear();
        transcript.history.clear();
        true
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::{GatedBackend, MockBackend};
    use crate::backend::ChatReply;
    use crate::chat::{Sender, CHAT_ERROR_MESSAGE};

    fn session_with(backend: Arc<MockBackend>) -> ChatSession {
        ChatSession::new(backend)
    }

    #[tokio::test]
    async fn test_empty_input_never_calls_backend() {
        let backend = Arc::new(MockBackend::new());
        let session = session_with(backend.clone());

        for input in ["", "   ", "\n\t "] {
            assert_eq!(
                session.send(input).await,
                SendOutcome::Rejected(RejectReason::Empty)
            );
        }

        assert_eq!(backend.chat_calls(), 0);
        assert!(session.transcript().await.is_empty());
        assert!(session.welcome_visible().await);
    }

    #[tokio::test]
    async fn test_success_appends_user_then_bot() {
        let backend = Arc::new(MockBackend::new());
        backend.push_chat(Ok(ChatReply {
            response: "Block A1 leads.".to_string(),
            graph: Some("UE5H".to_string()),
        }));
        let session = session_with(backend.clone());

        let outcome = session.send("top blocks?").await;
        assert!(matches!(outcome, SendOutcome::Replied(_)));

        let transcript = session.transcript().await;
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].sender, Sender::User);
        assert_eq!(transcript[0].text, "top blocks?");
        assert_eq!(transcript[1].sender, Sender::Bot);
        assert_eq!(transcript[1].text, "Block A1 leads.");
        assert_eq!(transcript[1].graph.as_deref(), Some("UE5H"));
        assert!(!transcript[1].is_error);
        assert!(transcript[0].id < transcript[1].id);
        assert!(!session.is_loading());
        assert!(!session.welcome_visible().await);
    }

    #[tokio::test]
    async fn test_failure_appends_user_then_error() {
        let backend = Arc::new(MockBackend::new());
        backend.push_chat(Err(crate::backend::ClientError::Unavailable));
        let session = session_with(backend.clone());

        let outcome = session.send("anything").await;
        assert!(matches!(outcome, SendOutcome::Failed(_)));

        let transcript = session.transcript().await;
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].sender, Sender::User);
        assert_eq!(transcript[1].sender, Sender::Bot);
        assert!(transcript[1].is_error);
        assert_eq!(transcript[1].text, CHAT_ERROR_MESSAGE);
        assert!(session.history().await.is_empty());
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_history_sent_on_next_request() {
        let backend = Arc::new(MockBackend::new());
        backend.push_chat(Ok(ChatReply {
            response: "first answer".to_string(),
            graph: None,
        }));
        backend.push_chat(Err(crate::backend::ClientError::Timeout));
        backend.push_chat(Ok(ChatReply {
            response: "third answer".to_string(),
            graph: None,
        }));
        let session = session_with(backend.clone());

        session.send("first").await;
        session.send("second").await;
        session.send("third").await;

        let requests = backend.chat_requests();
        assert_eq!(requests.len(), 3);
        assert!(requests[0].history.is_empty());
        assert_eq!(requests[1].history, vec![HistoryTurn::new("first", "first answer")]);
        // The failed exchange contributes no turn
        assert_eq!(requests[2].history, vec![HistoryTurn::new("first", "first answer")]);
        assert_eq!(session.history().await.len(), 2);
        assert_eq!(session.transcript().await.len(), 6);
    }

    #[tokio::test]
    async fn test_second_send_while_in_flight_is_ignored() {
        let backend = Arc::new(GatedBackend::new());
        let session = Arc::new(ChatSession::new(backend.clone()));

        let first = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.send("first").await })
        };

        backend.wait_until_entered().await;
        assert!(session.is_loading());
        assert_eq!(
            session.send("second").await,
            SendOutcome::Rejected(RejectReason::Busy)
        );

        backend.release();
        let outcome = first.await.unwrap();
        assert!(matches!(outcome, SendOutcome::Replied(_)));

        assert_eq!(backend.calls(), 1);
        let transcript = session.transcript().await;
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].text, "first");
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn test_send_suggestion() {
        let backend = Arc::new(MockBackend::new());
        let session = session_with(backend.clone());

        assert!(session.send_suggestion(7).await.is_none());
        assert!(session.send_suggestion(0).await.is_some());
        assert_eq!(backend.chat_requests()[0].message, SUGGESTIONS[0]);
    }

    #[tokio::test]
    async fn test_clear_resets_welcome() {
        let backend = Arc::new(MockBackend::new());
        let session = session_with(backend);

        session.send("hello").await;
        assert!(!session.welcome_visible().await);

        assert!(session.clear().await);
        assert!(session.welcome_visible().await);
        assert!(session.history().await.is_empty());
    }

    #[tokio::test]
    async fn test_clear_refused_while_reply_pending() {
        let backend = Arc::new(GatedBackend::new());
        let session = Arc::new(ChatSession::new(backend.clone()));

        let pending = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.send("first").await })
        };

        backend.wait_until_entered().await;
        assert!(!session.clear().await);

        backend.release();
        assert!(matches!(pending.await.unwrap(), SendOutcome::Replied(_)));

        let senders: Vec<Sender> = session.transcript().await.iter().map(|m| m.sender).collect();
        assert_eq!(senders, [Sender::User, Sender::Bot]);
        assert_eq!(session.history().await, vec![HistoryTurn::new("first", "echo: first")]);

        assert!(session.clear().await);
        assert!(session.welcome_visible().await);
    }

    #[tokio::test]
    async fn test_message_sent_as_typed() {
        let backend = Arc::new(MockBackend::new());
        let session = session_with(backend.clone());

        session.send("  top blocks?\n").await;

        assert_eq!(backend.chat_requests()[0].message, "  top blocks?\n");
        assert_eq!(session.transcript().await[0].text, "  top blocks?\n");
    }
}
