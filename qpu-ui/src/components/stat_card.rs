//! Stat Card Component
//!
//! One dashboard card: title, headline value, optional breakdown, notes and
//! progress meter.

use leptos::*;

/// Progress meter at the bottom of a card
#[derive(Clone, Debug, PartialEq)]
pub struct CardMeter {
    pub label: &'static str,
    /// Fill ratio in [0, 1]
    pub ratio: f64,
    pub value: String,
}

/// Dashboard stat card
#[component]
pub fn StatCard(
    title: &'static str,
    #[prop(into)]
    value: String,
    #[prop(optional)]
    badge: Option<&'static str>,
    #[prop(optional)]
    details: Vec<(&'static str, String)>,
    #[prop(optional)]
    notes: Vec<String>,
    #[prop(optional)]
    meter: Option<CardMeter>,
) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-5 border border-gray-700">
            <div class="flex items-center justify-between">
                <span class="text-gray-400 text-sm">{title}</span>
                {badge.map(|b| view! {
                    <span class="text-xs px-2 py-0.5 rounded-full bg-indigo-600 text-white">{b}</span>
                })}
            </div>

            <div class="text-3xl font-bold mt-2">{value}</div>

            {(!details.is_empty()).then(|| view! {
                <div class="flex space-x-4 mt-3 text-sm">
                    {details.into_iter().map(|(label, value)| view! {
                        <div>
                            <span class="text-gray-400">{label}": "</span>
                            <span class="font-semibold">{value}</span>
                        </div>
                    }).collect_view()}
                </div>
            })}

            {notes.into_iter().map(|note| view! {
                <p class="text-gray-400 text-sm mt-1">{note}</p>
            }).collect_view()}

            {meter.map(|m| {
                let width = format!("width: {:.1}%", m.ratio.clamp(0.0, 1.0) * 100.0);
                view! {
                    <div class="mt-4">
                        <div class="flex justify-between text-xs text-gray-400 mb-1">
                            <span>{m.label}</span>
                            <span>{m.value}</span>
                        </div>
                        <div class="h-2 bg-gray-700 rounded">
                            <div class="h-2 bg-indigo-500 rounded" style=width />
                        </div>
                    </div>
                }
            })}
        </div>
    }
}

/// Skeleton loader for a card
#[component]
pub fn StatCardSkeleton() -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-5 animate-pulse">
            <div class="h-4 bg-gray-700 rounded w-1/3 mb-4" />
            <div class="h-8 bg-gray-700 rounded w-1/2 mb-2" />
            <div class="h-4 bg-gray-700 rounded w-2/3" />
        </div>
    }
}
