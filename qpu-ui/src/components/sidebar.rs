//! Sidebar Component
//!
//! Brand header and one button per section.

use leptos::*;

use crate::state::global::{GlobalState, Section};

/// Section navigation sidebar
#[component]
pub fn Sidebar() -> impl IntoView {
    view! {
        <nav class="w-64 shrink-0 bg-gray-800 border-r border-gray-700 flex flex-col">
            <div class="flex items-center space-x-3 h-16 px-6 border-b border-gray-700">
                <span class="text-2xl">"⚛️"</span>
                <span class="text-xl font-bold">"QPU Console"</span>
            </div>

            <div class="flex-1 py-4 space-y-1">
                {Section::ALL
                    .into_iter()
                    .map(|section| view! { <SidebarItem section=section /> })
                    .collect_view()}
            </div>
        </nav>
    }
}

#[component]
fn SidebarItem(section: Section) -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let active = move || state.active_section.get() == section;

    view! {
        <button
            class="w-full flex items-center space-x-3 px-6 py-3 text-left text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            class:bg-gray-700=active
            class:text-white=active
            on:click=move |_| state.show(section)
        >
            <span>{section.icon()}</span>
            <span>{section.label()}</span>
        </button>
    }
}
