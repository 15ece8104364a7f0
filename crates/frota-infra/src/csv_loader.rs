//! CSV ingestion
//!
//! Exports from the fleet system come as UTF-8 or Windows-1252, separated by
//! either commas or semicolons.

use encoding_rs::{UTF_8, WINDOWS_1252};
use frota_domain::model::{CellValue, Table};
use frota_types::{Error, Result};
use tracing::warn;

/// Parse CSV bytes into a table; the first non-empty record is the header
pub fn parse_csv_bytes(bytes: &[u8]) -> Result<Table> {
    let text = decode(bytes);
    let delimiter = detect_delimiter(&text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut table: Option<Table> = None;
    for result in reader.records() {
        let record = result?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        match table.as_mut() {
            None => table = Some(Table::new(record.iter().map(str::to_string).collect())),
            Some(t) => t.push_row(record.iter().map(to_cell_value).collect()),
        }
    }

    table.ok_or_else(|| Error::EmptyWorkbook("CSV file is empty".to_string()))
}

fn decode(bytes: &[u8]) -> String {
    // UTF-8 decode strips a BOM if present
    let (decoded, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors {
        return decoded.into_owned();
    }
    warn!("CSV is not valid UTF-8, decoding as Windows-1252");
    let (decoded, _, _) = WINDOWS_1252.decode(bytes);
    decoded.into_owned()
}

fn detect_delimiter(text: &str) -> u8 {
    let first_line = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

fn to_cell_value(field: &str) -> CellValue {
    if field.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(field.to_string())
    }
}
