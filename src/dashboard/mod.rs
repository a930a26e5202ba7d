//! QPU Dashboard
//!
//! Summary statistics and efficiency metrics for leased QPU blocks.
//!
//! ## Data Flow
//!
//! 1. `DashboardLoader` fetches `/api/summary` and `/api/efficiency` together
//! 2. `EfficiencyOverview` derives the average cost and latest Atom ratio
//! 3. `build_cards` turns the result into the three summary cards

mod cards;
mod loader;

pub use cards::{build_cards, DashboardCard, Meter};
pub use loader::{
    DashboardData, DashboardError, DashboardLoader, DashboardState, EfficiencyOverview,
    DASHBOARD_ERROR_MESSAGE,
};
