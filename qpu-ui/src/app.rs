//! App Root Component
//!
//! Sidebar plus the three sections. Hidden sections stay mounted so the
//! transcript and dashboard survive switching.

use leptos::*;

use crate::components::Sidebar;
use crate::pages::{ChatInterface, Dashboard, Optimisation};
use crate::state::global::{provide_global_state, GlobalState, Section};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    view! {
        <div class="min-h-screen bg-gray-900 text-white flex">
            <Sidebar />

            <main class="flex-1 px-6 py-8 overflow-y-auto">
                <SectionPanel section=Section::Charts>
                    <Dashboard />
                </SectionPanel>
                <SectionPanel section=Section::Optimisation>
                    <Optimisation />
                </SectionPanel>
                <SectionPanel section=Section::Assistant>
                    <ChatInterface />
                </SectionPanel>
            </main>
        </div>
    }
}

/// Shows its children only while `section` is active
#[component]
fn SectionPanel(section: Section, children: Children) -> impl IntoView {
    let state = expect_context::<GlobalState>();

    view! {
        <section
            id=section.id()
            class="h-full"
            class:hidden=move || state.active_section.get() != section
        >
            {children()}
        </section>
    }
}
