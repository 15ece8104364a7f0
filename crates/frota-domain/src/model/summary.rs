//! Reconciliation statistics

use serde::Serialize;

/// Count with its share of the fleet, in percent rounded to 2 decimals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Tally {
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusShare {
    pub status: String,
    pub count: usize,
    pub percentage: f64,
}

/// Labels and values for a bar or pie chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReconciliationSummary {
    pub total_records: usize,
    /// Most frequent status first
    pub status_distribution: Vec<StatusShare>,
    pub to_idle: Tally,
    pub to_active: Tally,
    pub status_changes: Tally,
    pub base_changes: usize,
    pub cost_center_changes: usize,
    pub multi_change_plates: usize,
    pub total_change_rows: usize,
}

impl ReconciliationSummary {
    pub fn status_chart(&self) -> ChartData {
        ChartData {
            labels: self
                .status_distribution
                .iter()
                .map(|s| s.status.clone())
                .collect(),
            values: self.status_distribution.iter().map(|s| s.count).collect(),
        }
    }

    pub fn correction_chart(&self) -> ChartData {
        ChartData {
            labels: vec![
                "Active vehicles that should be idle".to_string(),
                "Idle vehicles that should be active".to_string(),
            ],
            values: vec![self.to_idle.count, self.to_active.count],
        }
    }
}
