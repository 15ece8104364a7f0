//! Plain-text summary report

use crate::model::{ReconciliationSummary, StatusRules};

pub fn generate_summary_report(summary: &ReconciliationSummary, rules: &StatusRules) -> String {
    let mut report = String::new();
    report.push_str("==================================================\n");
    report.push_str("            RESULTADOS DEL ANÁLISIS               \n");
    report.push_str("            Fleet Reconciliation Report           \n");
    report.push_str("==================================================\n\n");
    report.push_str(&format!(
        "  Fleet size:                      {} vehicles\n\n",
        summary.total_records
    ));

    report.push_str("[Status distribution]\n");
    if summary.status_distribution.is_empty() {
        report.push_str("  (no records)\n");
    }
    for share in &summary.status_distribution {
        report.push_str(&format!(
            "  - {:<30} {:>6} ({:.2}%)\n",
            truncate_str(&share.status, 30),
            share.count,
            share.percentage
        ));
    }
    report.push('\n');

    report.push_str("[Inconsistencies]\n");
    report.push_str(&format!(
        "  '{}' listed as available:\n    {} vehicles ({:.2}%)\n",
        rules.active, summary.to_idle.count, summary.to_idle.percentage
    ));
    report.push_str(&format!(
        "  '{}' not listed as available:\n    {} vehicles ({:.2}%)\n",
        rules.idle, summary.to_active.count, summary.to_active.percentage
    ));
    report.push_str(&format!(
        "  Base corrections:                {}\n",
        summary.base_changes
    ));
    report.push_str(&format!(
        "  Cost center corrections:         {}\n",
        summary.cost_center_changes
    ));
    report.push_str(&format!(
        "  Vehicles with several changes:   {}\n\n",
        summary.multi_change_plates
    ));

    report.push_str(&format!(
        "  Status updates:                  {} vehicles ({:.2}%)\n",
        summary.status_changes.count, summary.status_changes.percentage
    ));
    report.push_str(&format!(
        "  Rows in correction sheet:        {}\n",
        summary.total_change_rows
    ));
    report.push_str("==================================================\n");
    report
}

/// Shorten to `max_len` characters, marking the cut with `..`
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}
