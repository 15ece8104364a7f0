//! Fleet statistics and change tallies

use std::collections::HashMap;

use crate::model::{
    ChangeSet, NormalizedFleet, ReconciliationSummary, StatusCorrections, StatusShare, Tally,
};

/// `100 * count / total` rounded to 2 decimals, halves to even; 0 for an empty fleet
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = count as f64 * 100.0 / total as f64;
    (pct * 100.0).round_ties_even() / 100.0
}

fn tally(count: usize, total: usize) -> Tally {
    Tally {
        count,
        percentage: percentage(count, total),
    }
}

pub fn build_summary(
    fleet: &NormalizedFleet,
    corrections: &StatusCorrections,
    changes: &ChangeSet,
) -> ReconciliationSummary {
    let total = fleet.records.len();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in &fleet.records {
        *counts.entry(record.status.as_str()).or_insert(0) += 1;
    }
    let mut status_distribution: Vec<StatusShare> = counts
        .into_iter()
        .map(|(status, count)| StatusShare {
            status: status.to_string(),
            count,
            percentage: percentage(count, total),
        })
        .collect();
    status_distribution.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.status.cmp(&b.status)));

    ReconciliationSummary {
        total_records: total,
        status_distribution,
        to_idle: tally(corrections.to_idle.len(), total),
        to_active: tally(corrections.to_active.len(), total),
        status_changes: tally(corrections.total(), total),
        base_changes: changes.base.len(),
        cost_center_changes: changes.cost_center.len(),
        multi_change_plates: changes.multi_change_count(),
        total_change_rows: changes.changed_plates().len(),
    }
}
