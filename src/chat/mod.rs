//! Analysis Chat
//!
//! The chat surface: an ordered transcript of user and bot messages, the
//! completed turns sent back as context, and the welcome suggestions.

mod message;
mod session;

pub use message::{
    ChatMessage, Sender, CHAT_ERROR_MESSAGE, OPTIMISATION_PROMPTS, SUGGESTIONS, WELCOME_MESSAGE,
};
pub use session::{ChatSession, RejectReason, SendOutcome};
