//! Dashboard Page
//!
//! Summary cards and quick-analysis graphs. Summary and efficiency are
//! fetched together; if either fails the whole section shows the error panel.

use futures_util::future::try_join;
use leptos::*;

use crate::api::{self, EfficiencyRecord, GraphKind, Summary};
use crate::components::stat_card::CardMeter;
use crate::components::{StatCard, StatCardSkeleton};
use crate::format::{format_currency, format_grouped, format_number, format_percent};

const ERROR_MESSAGE: &str = "Error loading data. Please try again later.";

#[derive(Clone, Debug, PartialEq)]
enum LoadState {
    Loading,
    Ready(Summary, Vec<EfficiencyRecord>),
    Failed,
}

/// Average cost per workload and the most recent Atom ratio
fn efficiency_overview(records: &[EfficiencyRecord]) -> (f64, f64) {
    match records.last() {
        None => (0.0, 0.0),
        Some(latest) => {
            let total: f64 = records.iter().map(|r| r.cost_per_workload).sum();
            (total / records.len() as f64, latest.atom_block_ratio)
        }
    }
}

fn load(state: RwSignal<LoadState>) {
    state.set(LoadState::Loading);
    spawn_local(async move {
        match try_join(api::fetch_summary(), api::fetch_efficiency()).await {
            Ok((summary, efficiency)) => state.set(LoadState::Ready(summary, efficiency)),
            Err(e) => {
                web_sys::console::error_1(&format!("Failed to load dashboard: {}", e).into());
                state.set(LoadState::Failed);
            }
        }
    });
}

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = create_rw_signal(LoadState::Loading);

    // Fetch on mount
    create_effect(move |_| load(state));

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"QPU Performance Summary"</h1>
                <p class="text-gray-400 mt-1">"Leased blocks, workloads and efficiency"</p>
            </div>

            {move || match state.get() {
                LoadState::Loading => view! {
                    <div class="grid md:grid-cols-3 gap-4">
                        <StatCardSkeleton />
                        <StatCardSkeleton />
                        <StatCardSkeleton />
                    </div>
                }.into_view(),
                LoadState::Failed => view! {
                    <div class="bg-red-900/40 border border-red-700 rounded-lg p-6 text-center space-y-4">
                        <p class="text-red-200">{ERROR_MESSAGE}</p>
                        <button
                            class="px-4 py-2 bg-red-700 hover:bg-red-600 rounded-lg font-medium transition-colors"
                            on:click=move |_| load(state)
                        >
                            "Retry"
                        </button>
                    </div>
                }.into_view(),
                LoadState::Ready(summary, efficiency) => view! {
                    <SummaryCards summary=summary efficiency=efficiency />
                    <QuickAnalysis />
                }.into_view(),
            }}
        </div>
    }
}

#[component]
fn SummaryCards(summary: Summary, efficiency: Vec<EfficiencyRecord>) -> impl IntoView {
    let zero = |v: Option<f64>| v.unwrap_or(0.0);
    let (avg_cost, atom_ratio) = efficiency_overview(&efficiency);

    view! {
        <div class="grid md:grid-cols-3 gap-4">
            <StatCard
                title="QPU Blocks Leased"
                value=format_number(zero(summary.total_blocks_leased))
                details=vec![
                    ("Atom", format_number(zero(summary.atom_blocks))),
                    ("Photon", format_number(zero(summary.photon_blocks))),
                    ("Spin", format_number(zero(summary.spin_blocks))),
                ]
            />
            <StatCard
                title="Total Workloads"
                value=format_grouped(zero(summary.total_workloads))
                notes=vec![
                    format!("Avg {} workloads per block", format_number(zero(summary.avg_workloads_per_block))),
                    format!("Avg {} workloads per day", format_grouped(zero(summary.avg_daily_workloads))),
                ]
            />
            <StatCard
                title="Efficiency Metrics"
                badge="Beta"
                value=format_currency(avg_cost)
                notes=vec!["Average cost per workload".to_string()]
                meter=CardMeter {
                    label: "Atom Block Ratio",
                    ratio: atom_ratio,
                    value: format_percent(atom_ratio),
                }
            />
        </div>
    }
}

/// Label and URL for each backend-rendered graph
fn graph_links() -> Vec<(&'static str, String)> {
    GraphKind::ALL.iter().map(|kind| (kind.label(), kind.url())).collect()
}

/// Links to the backend-rendered graphs; images load only when opened
#[component]
fn QuickAnalysis() -> impl IntoView {
    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Quick Analysis"</h2>
            <div class="grid md:grid-cols-3 gap-4">
                {graph_links().into_iter().map(|(label, url)| view! {
                    <a href=url target="_blank" class="block bg-gray-900 rounded-lg p-4 text-center hover:ring-2 ring-indigo-500">
                        <span class="text-sm text-gray-300">{label}</span>
                    </a>
                }).collect_view()}
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(cost: f64, ratio: f64) -> EfficiencyRecord {
        EfficiencyRecord {
            date: None,
            cost_per_workload: cost,
            atom_block_ratio: ratio,
            extra: Default::default(),
        }
    }

    #[test]
    fn test_efficiency_overview() {
        let (avg, ratio) = efficiency_overview(&[record(1.0, 0.2), record(3.0, 0.7)]);
        assert!((avg - 2.0).abs() < 1e-12);
        assert!((ratio - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_efficiency_overview_empty() {
        assert_eq!(efficiency_overview(&[]), (0.0, 0.0));
    }

    #[test]
    fn test_graph_links() {
        let links = graph_links();
        assert_eq!(links.len(), 3);
        assert_eq!(links[0], ("Cost Analysis", "/api/graphs/costs".to_string()));
        assert_eq!(links[2].1, "/api/graphs/efficiency");
    }
}
