//! Output formatting module

use std::path::Path;

use frota_app::ProcessOutcome;
use frota_domain::model::StatusRules;
use frota_domain::service::{generate_summary_report, truncate_str};
use frota_types::{FieldRole, OutputFormat, Result, TableKind};
use serde::Serialize;
use serde_json::json;

/// Which header a role resolved to, if any
#[derive(Debug, Clone, Serialize)]
pub struct RoleMapping {
    pub role: FieldRole,
    pub required: bool,
    pub column: Option<String>,
}

const MAX_CELL_WIDTH: usize = 24;

pub fn output_reconcile(
    output_format: OutputFormat,
    outcome: &ProcessOutcome,
    statuses: &StatusRules,
    output_path: &Path,
    embedded: Option<&str>,
) -> Result<()> {
    let summary = &outcome.summary;
    let table = &outcome.reconciliation.output;

    if output_format == OutputFormat::Json {
        let mut value = json!({
            "filename": outcome.filename,
            "output_path": output_path.display().to_string(),
            "summary": summary,
            "table_data": summary.status_distribution,
            "charts": {
                "status_distribution": summary.status_chart(),
                "status_errors": summary.correction_chart(),
            },
            "corrections": table,
        });
        if let Some(encoded) = embedded {
            value["file"] = json!(encoded);
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print!("{}", generate_summary_report(summary, statuses));

    if table.is_empty() {
        println!("\nNo corrections needed.");
    } else {
        println!("\nCorrections ({} rows)", table.len());
        let widths: Vec<usize> = table
            .columns
            .iter()
            .enumerate()
            .map(|(col, header)| {
                table
                    .rows
                    .iter()
                    .filter_map(|r| r.get(col))
                    .map(|v| v.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
                    .min(MAX_CELL_WIDTH)
            })
            .collect();

        print_row(&table.columns, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        println!("{}", rule.join("-+-"));
        for row in &table.rows {
            print_row(row, &widths);
        }
    }

    println!("\nSaved: {}", output_path.display());
    Ok(())
}

fn print_row(cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", truncate_str(cell, width), width = width))
        .collect();
    println!("{}", line.join(" | ").trim_end());
}

pub fn output_roles(
    output_format: OutputFormat,
    kind: TableKind,
    source: &str,
    headers: &[String],
    mapping: &[RoleMapping],
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let value = json!({
            "kind": kind,
            "source": source,
            "headers": headers,
            "roles": mapping,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("\nColumns of {}", kind);
    println!("{}", "=".repeat(11 + kind.to_string().len()));
    println!("Source: {}\n", source);
    for (i, header) in headers.iter().enumerate() {
        let shown = if header.trim().is_empty() { "(blank)" } else { header.as_str() };
        println!("  {:>2}. {}", i + 1, shown);
    }

    println!("\nRoles:");
    for m in mapping {
        let column = match (&m.column, m.required) {
            (Some(c), _) => c.clone(),
            (None, true) => "MISSING (required)".to_string(),
            (None, false) => "- (not reconciled)".to_string(),
        };
        println!("  {:<12} {}", m.role.label(), column);
    }

    Ok(())
}
