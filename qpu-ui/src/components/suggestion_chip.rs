//! Suggestion Chip Component

use leptos::*;

use crate::state::global::GlobalState;

/// Clickable suggestion that sends its text as a chat message
#[component]
pub fn SuggestionChip(text: &'static str) -> impl IntoView {
    let state = expect_context::<GlobalState>();

    view! {
        <button
            class="px-3 py-2 bg-gray-700 hover:bg-gray-600 disabled:opacity-50 rounded-full text-sm text-gray-200 transition-colors"
            disabled=move || state.chat_loading.get()
            on:click=move |_| {
                state.send_message(text);
            }
        >
            {text}
        </button>
    }
}
