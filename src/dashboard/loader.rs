//! Dashboard Loader
//!
//! Fetches the summary snapshot and the efficiency series concurrently and
//! derives the two headline efficiency values. Loading is all-or-nothing.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::backend::{AnalysisBackend, ClientError, EfficiencyRecord, SummarySnapshot};

/// Shown in place of the dashboard when loading fails
pub const DASHBOARD_ERROR_MESSAGE: &str = "Error loading data. Please try again later.";

/// Values derived from the efficiency series
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EfficiencyOverview {
    /// Mean cost per workload over every returned day
    pub avg_cost_per_workload: f64,
    /// Atom block ratio of the most recent day
    pub latest_atom_ratio: f64,
    /// Number of days the averages cover
    pub days: usize,
}

impl EfficiencyOverview {
    /// Derive the overview; an empty series yields zeros
    pub fn from_records(records: &[EfficiencyRecord]) -> Self {
        let Some(latest) = records.last() else {
            return Self::default();
        };

        let total: f64 = records.iter().map(|r| r.cost_per_workload).sum();

        Self {
            avg_cost_per_workload: total / records.len() as f64,
            latest_atom_ratio: latest.atom_block_ratio,
            days: records.len(),
        }
    }
}

/// Everything one successful load produced
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub summary: SummarySnapshot,
    pub efficiency: Vec<EfficiencyRecord>,
    pub overview: EfficiencyOverview,
}

/// What the dashboard panel currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Loading,
    Ready(DashboardData),
    Failed,
}

/// Errors from a dashboard load
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Failed to load summary: {0}")]
    Summary(#[source] ClientError),

    #[error("Failed to load efficiency data: {0}")]
    Efficiency(#[source] ClientError),
}

/// Loads and holds the dashboard panel state
pub struct DashboardLoader {
    backend: Arc<dyn AnalysisBackend>,
    state: RwLock<DashboardState>,
}

impl DashboardLoader {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self {
            backend,
            state: RwLock::new(DashboardState::Loading),
        }
    }

    /// Fetch both endpoints concurrently, failing if either fails
    pub async fn load(&self) -> Result<DashboardData, DashboardError> {
        let (summary, efficiency) = tokio::try_join!(
            async { self.backend.summary().await.map_err(DashboardError::Summary) },
            async { self.backend.efficiency().await.map_err(DashboardError::Efficiency) },
        )?;

        let overview = EfficiencyOverview::from_records(&efficiency);
        tracing::info!(
            days = overview.days,
            avg_cost_per_workload = overview.avg_cost_per_workload,
            "Dashboard data loaded"
        );

        Ok(DashboardData {
            summary,
            efficiency,
            overview,
        })
    }

    /// Load and publish the result as the panel state (also the retry action)
    pub async fn refresh(&self) -> DashboardState {
        *self.state.write().await = DashboardState::Loading;

        let next = match self.load().await {
            Ok(data) => DashboardState::Ready(data),
            Err(e) => {
                tracing::error!(error = %e, "Error fetching dashboard data");
                DashboardState::Failed
            }
        };

        *self.state.write().await = next.clone();
        next
    }

    /// Current panel state
    pub async fn state(&self) -> DashboardState {
        self.state.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;

    fn records(costs: &[f64]) -> Vec<EfficiencyRecord> {
        costs
            .iter()
            .enumerate()
            .map(|(i, c)| EfficiencyRecord::new(*c, 0.1 * (i + 1) as f64))
            .collect()
    }

    #[test]
    fn test_overview_average_and_latest() {
        let overview = EfficiencyOverview::from_records(&records(&[1.0, 2.0, 3.0]));
        assert_eq!(overview.avg_cost_per_workload, 2.0);
        assert!((overview.latest_atom_ratio - 0.3).abs() < 1e-12);
        assert_eq!(overview.days, 3);
    }

    #[test]
    fn test_overview_empty_is_zero() {
        let overview = EfficiencyOverview::from_records(&[]);
        assert_eq!(overview.avg_cost_per_workload, 0.0);
        assert_eq!(overview.latest_atom_ratio, 0.0);
        assert_eq!(overview.days, 0);
    }

    #[tokio::test]
    async fn test_refresh_ready() {
        let backend = Arc::new(MockBackend::new());
        backend.set_summary(Ok(SummarySnapshot {
            total_blocks_leased: Some(12.0),
            ..Default::default()
        }));
        backend.set_efficiency(Ok(records(&[1.0, 2.0, 3.0])));

        let loader = DashboardLoader::new(backend.clone());
        assert_eq!(loader.state().await, DashboardState::Loading);

        let state = loader.refresh().await;
        match &state {
            DashboardState::Ready(data) => {
                assert_eq!(data.summary.total_blocks_leased, Some(12.0));
                assert_eq!(data.overview.avg_cost_per_workload, 2.0);
            }
            other => panic!("expected ready, got {:?}", other),
        }
        assert_eq!(loader.state().await, state);
        assert_eq!(backend.summary_calls(), 1);
        assert_eq!(backend.efficiency_calls(), 1);
    }

    #[tokio::test]
    async fn test_any_failure_fails_whole_dashboard() {
        let backend = Arc::new(MockBackend::new());
        backend.set_summary(Ok(SummarySnapshot::default()));
        backend.set_efficiency(Err(ClientError::Decode("bad json".to_string())));

        let loader = DashboardLoader::new(backend.clone());
        assert!(matches!(
            loader.load().await,
            Err(DashboardError::Efficiency(ClientError::Decode(_)))
        ));

        backend.set_summary(Err(ClientError::Unavailable));
        backend.set_efficiency(Ok(records(&[1.0])));
        assert_eq!(loader.refresh().await, DashboardState::Failed);
        assert_eq!(loader.state().await, DashboardState::Failed);
    }

    #[tokio::test]
    async fn test_retry_after_failure() {
        let backend = Arc::new(MockBackend::new());
        backend.set_summary(Err(ClientError::Timeout));

        let loader = DashboardLoader::new(backend.clone());
        assert_eq!(loader.refresh().await, DashboardState::Failed);

        // Mock falls back to empty successes once the scripted error is used
        let state = loader.refresh().await;
        assert!(matches!(state, DashboardState::Ready(ref d) if d.overview.days == 0));
    }
}
