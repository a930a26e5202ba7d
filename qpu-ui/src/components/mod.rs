//! UI Components
//!
//! Reusable Leptos components for the dashboard and assistant.

pub mod chat_message;
pub mod loading;
pub mod sidebar;
pub mod stat_card;
pub mod suggestion_chip;

pub use chat_message::ChatMessageView;
pub use loading::TypingIndicator;
pub use sidebar::Sidebar;
pub use stat_card::{StatCard, StatCardSkeleton};
pub use suggestion_chip::SuggestionChip;
