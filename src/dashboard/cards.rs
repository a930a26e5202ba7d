//! Dashboard Cards
//!
//! The three summary cards as plain data, plus their terminal rendering.

use std::fmt;

use super::loader::DashboardData;
use crate::backend::SummarySnapshot;
use crate::render::{format_currency, format_grouped, format_number, format_percent, progress_bar};

const BAR_WIDTH: usize = 24;

/// Progress meter shown at the bottom of a card
#[derive(Debug, Clone, PartialEq)]
pub struct Meter {
    pub label: String,
    /// Fill ratio in [0, 1]
    pub ratio: f64,
    pub value: String,
}

/// One dashboard card
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardCard {
    pub title: String,
    pub badge: Option<String>,
    /// Headline statistic
    pub value: String,
    /// Labelled breakdown (e.g. per block type)
    pub details: Vec<(String, String)>,
    /// Free-form lines under the headline
    pub notes: Vec<String>,
    pub meter: Option<Meter>,
}

impl DashboardCard {
    fn new(title: &str, value: String) -> Self {
        Self {
            title: title.to_string(),
            badge: None,
            value,
            details: Vec::new(),
            notes: Vec::new(),
            meter: None,
        }
    }
}

fn or_zero(value: Option<f64>) -> f64 {
    value.unwrap_or(0.0)
}

/// Build the QPU blocks, workloads and efficiency cards
pub fn build_cards(data: &DashboardData) -> Vec<DashboardCard> {
    vec![
        blocks_card(&data.summary),
        workloads_card(&data.summary),
        efficiency_card(data),
    ]
}

fn blocks_card(summary: &SummarySnapshot) -> DashboardCard {
    let mut card = DashboardCard::new(
        "QPU Blocks Leased",
        format_number(or_zero(summary.total_blocks_leased)),
    );
    card.details = vec![
        ("Atom".to_string(), format_number(or_zero(summary.atom_blocks))),
        ("Photon".to_string(), format_number(or_zero(summary.photon_blocks))),
        ("Spin".to_string(), format_number(or_zero(summary.spin_blocks))),
    ];
    card
}

fn workloads_card(summary: &SummarySnapshot) -> DashboardCard {
    let mut card = DashboardCard::new(
        "Total Workloads",
        format_grouped(or_zero(summary.total_workloads)),
    );
    card.notes = vec![
        format!(
            "Avg {} workloads per block",
            format_number(or_zero(summary.avg_workloads_per_block))
        ),
        format!(
            "Avg {} workloads per day",
            format_grouped(or_zero(summary.avg_daily_workloads))
        ),
    ];
    card
}

fn efficiency_card(data: &DashboardData) -> DashboardCard {
    let overview = &data.overview;
    let mut card = DashboardCard::new(
        "Efficiency Metrics",
        format_currency(overview.avg_cost_per_workload),
    );
    card.badge = Some("Beta".to_string());
    card.notes = vec!["Average cost per workload".to_string()];
    card.meter = Some(Meter {
        label: "Atom Block Ratio".to_string(),
        ratio: overview.latest_atom_ratio,
        value: format_percent(overview.latest_atom_ratio),
    });
    card
}

impl fmt::Display for DashboardCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.badge {
            Some(badge) => writeln!(f, "{} ({})", self.title, badge)?,
            None => writeln!(f, "{}", self.title)?,
        }
        writeln!(f, "  {}", self.value)?;

        if !self.details.is_empty() {
            let breakdown: Vec<String> = self
                .details
                .iter()
                .map(|(label, value)| format!("{}: {}", label, value))
                .collect();
            writeln!(f, "  {}", breakdown.join("  |  "))?;
        }

        for note in &self.notes {
            writeln!(f, "  {}", note)?;
        }

        if let Some(meter) = &self.meter {
            writeln!(
                f,
                "  {} {} {}",
                meter.label,
                progress_bar(meter.ratio, BAR_WIDTH),
                meter.value
            )?;
        }

        Ok(())
    }
}
