//! Loading Component
//!
//! Assistant typing indicator.

use leptos::*;

/// Three pulsing dots shown while a reply is pending
#[component]
pub fn TypingIndicator() -> impl IntoView {
    view! {
        <div class="flex justify-start">
            <div class="bg-gray-700 rounded-lg px-4 py-3 flex space-x-1">
                <span class="typing-dot w-2 h-2 bg-gray-300 rounded-full" />
                <span class="typing-dot w-2 h-2 bg-gray-300 rounded-full" />
                <span class="typing-dot w-2 h-2 bg-gray-300 rounded-full" />
            </div>
        </div>
    }
}
