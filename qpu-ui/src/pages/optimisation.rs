//! Optimisation Page
//!
//! Preset what-if prompts. Each one opens the assistant and asks it.

use leptos::*;

use crate::state::global::GlobalState;

const TOOLS: [(&str, &str, &str); 3] = [
    (
        "Block Mix",
        "Compare costs across Atom, Photon and Spin block mixes.",
        "How would costs change if we moved to an 80% Atom block mix?",
    ),
    (
        "Batch Scheduling",
        "Estimate savings from grouping workloads into fewer lease windows.",
        "Simulate batching workloads into 3-day windows and show the savings.",
    ),
    (
        "Cost Negotiation",
        "See the effect of a lower lease price on total spend.",
        "What would a 10% lease cost reduction save us overall?",
    ),
];

#[component]
pub fn Optimisation() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-3xl font-bold">"Optimisation Tools"</h1>
                <p class="text-gray-400 mt-1">"Ask the assistant to model a change"</p>
            </div>

            <div class="grid md:grid-cols-3 gap-4">
                {TOOLS.into_iter().map(|(title, description, prompt)| view! {
                    <div class="bg-gray-800 rounded-lg p-5 border border-gray-700 flex flex-col">
                        <h2 class="text-lg font-semibold">{title}</h2>
                        <p class="text-gray-400 text-sm mt-2 flex-1">{description}</p>
                        <button
                            class="mt-4 px-4 py-2 bg-indigo-600 hover:bg-indigo-700 disabled:bg-gray-600 rounded-lg font-medium transition-colors"
                            disabled=move || state.chat_loading.get()
                            on:click=move |_| state.ask(prompt)
                        >
                            "Run analysis"
                        </button>
                    </div>
                }).collect_view()}
            </div>
        </div>
    }
}
