//! Chat Message Component
//!
//! One transcript bubble. Reply text keeps its line breaks; an attached graph
//! renders as an inline image.

use leptos::*;

use crate::format::text_lines;
use crate::state::global::{ChatMessage, Sender};

#[component]
pub fn ChatMessageView(message: ChatMessage) -> impl IntoView {
    let is_user = message.sender == Sender::User;

    let row_class = if is_user { "flex justify-end" } else { "flex justify-start" };
    let bubble_class = match (is_user, message.is_error) {
        (true, _) => "bg-indigo-600 text-white",
        (false, true) => "bg-red-900/60 text-red-100 border border-red-700",
        (false, false) => "bg-gray-700 text-gray-100",
    };

    let lines = text_lines(&message.text);
    let last = lines.len().saturating_sub(1);

    view! {
        <div class=row_class>
            <div class=format!("max-w-[75%] rounded-lg px-4 py-3 {}", bubble_class)>
                <p class="leading-relaxed">
                    {lines.into_iter().enumerate().map(|(i, line)| view! {
                        {line}
                        {(i < last).then(|| view! { <br /> })}
                    }).collect_view()}
                </p>

                {message.graph.map(|graph| view! {
                    <img
                        class="mt-3 rounded bg-white max-w-full"
                        src=format!("data:image/png;base64,{}", graph)
                        alt="Analysis graph"
                    />
                })}

                <div class="text-xs opacity-60 mt-1 text-right">{message.time}</div>
            </div>
        </div>
    }
}
