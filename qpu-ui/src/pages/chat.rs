//! Chat Page
//!
//! TeraOps assistant: transcript, welcome suggestions and the input box.
//! Only one request may be outstanding; input is disabled until it settles.

use leptos::html::Div;
use leptos::*;

use crate::components::{ChatMessageView, SuggestionChip, TypingIndicator};
use crate::state::global::{GlobalState, SUGGESTIONS, WELCOME_MESSAGE};

/// Chat interface component
#[component]
pub fn ChatInterface() -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let (input, set_input) = create_signal(String::new());
    let scroll_ref = create_node_ref::<Div>();

    // Keep the newest message in view
    create_effect(move |_| {
        state.messages.with(|_| ());
        state.chat_loading.with(|_| ());
        if let Some(el) = scroll_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    let submit = move || {
        if state.send_message(&input.get_untracked()) {
            set_input.set(String::new());
        }
    };

    view! {
        <div class="flex flex-col h-[calc(100vh-4rem)] bg-gray-800 rounded-xl">
            <div class="px-6 py-4 border-b border-gray-700">
                <h1 class="text-xl font-semibold">"TeraOps Assistant"</h1>
            </div>

            <div node_ref=scroll_ref class="flex-1 overflow-y-auto p-6 space-y-4">
                {move || {
                    if state.messages.with(Vec::is_empty) {
                        view! { <Welcome /> }.into_view()
                    } else {
                        view! {
                            <For
                                each=move || state.messages.get()
                                key=|message| message.id
                                children=|message| view! { <ChatMessageView message=message /> }
                            />
                        }.into_view()
                    }
                }}

                {move || state.chat_loading.get().then(|| view! { <TypingIndicator /> })}
            </div>

            <form
                class="flex space-x-2 p-4 border-t border-gray-700"
                on:submit=move |ev| {
                    ev.prevent_default();
                    submit();
                }
            >
                <textarea
                    rows="1"
                    placeholder="Ask about QPU usage, costs or efficiency..."
                    prop:value=move || input.get()
                    prop:disabled=move || state.chat_loading.get()
                    on:input=move |ev| set_input.set(event_target_value(&ev))
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" && !ev.shift_key() {
                            ev.prevent_default();
                            submit();
                        }
                    }
                    class="flex-1 resize-none bg-gray-700 rounded-lg px-4 py-2 border border-gray-600 focus:border-indigo-500 focus:outline-none"
                />
                <button
                    type="submit"
                    disabled=move || state.chat_loading.get() || input.get().trim().is_empty()
                    class="px-4 py-2 bg-indigo-600 hover:bg-indigo-700 disabled:bg-gray-600 rounded-lg font-medium transition-colors"
                >
                    "Send"
                </button>
            </form>
        </div>
    }
}

/// Greeting with suggestion chips, shown while the transcript is empty
#[component]
fn Welcome() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center h-full text-center space-y-6">
            <div class="text-5xl">"⚛️"</div>
            <p class="text-lg text-gray-200">{WELCOME_MESSAGE}</p>
            <div class="flex flex-wrap justify-center gap-2 max-w-2xl">
                {SUGGESTIONS.into_iter().map(|text| view! { <SuggestionChip text=text /> }).collect_view()}
            </div>
        </div>
    }
}
