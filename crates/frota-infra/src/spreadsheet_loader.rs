//! Workbook ingestion (xlsx, xlsm, xlsb, xls, ods) via calamine
//!
//! The first non-empty row of the sheet is the header row. Fully empty
//! data rows are skipped.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use frota_domain::model::{CellValue, Table};
use frota_types::{Error, Result};
use tracing::{debug, info};

use crate::csv_loader::parse_csv_bytes;

/// Kind of file an upload is parsed as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Workbook,
    Csv,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(SourceFormat::Workbook),
            "csv" | "txt" => Ok(SourceFormat::Csv),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Load the first sheet (or `sheet`) of a workbook or CSV file
pub fn load_table(path: &Path, sheet: Option<&str>) -> Result<Table> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let table = match SourceFormat::from_path(path)? {
        SourceFormat::Workbook => {
            let mut workbook = open_workbook_auto(path)
                .map_err(|e| Error::Spreadsheet(format!("{}: {}", path.display(), e)))?;
            read_sheet(&mut workbook, sheet)?
        }
        SourceFormat::Csv => parse_csv_bytes(&std::fs::read(path)?)?,
    };
    info!(path = %path.display(), rows = table.len(), "loaded table");
    Ok(table)
}

/// Parse an in-memory upload
pub fn load_table_from_bytes(bytes: &[u8], format: SourceFormat, sheet: Option<&str>) -> Result<Table> {
    match format {
        SourceFormat::Workbook => {
            let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
                .map_err(|e| Error::Spreadsheet(e.to_string()))?;
            read_sheet(&mut workbook, sheet)
        }
        SourceFormat::Csv => parse_csv_bytes(bytes),
    }
}

/// Requested sheet if present (exact, then case-insensitive), else the first one
pub(crate) fn pick_sheet(names: &[String], wanted: Option<&str>) -> Option<String> {
    if let Some(wanted) = wanted {
        if let Some(name) = names.iter().find(|n| n.as_str() == wanted) {
            return Some(name.clone());
        }
        if let Some(name) = names
            .iter()
            .find(|n| n.trim().eq_ignore_ascii_case(wanted.trim()))
        {
            return Some(name.clone());
        }
        debug!(wanted, "sheet not found, using first sheet");
    }
    names.first().cloned()
}

pub(crate) fn read_range<RS: Read + Seek>(
    workbook: &mut Sheets<RS>,
    sheet: Option<&str>,
) -> Result<(String, Range<Data>)> {
    let names = workbook.sheet_names();
    let name = pick_sheet(&names, sheet)
        .ok_or_else(|| Error::EmptyWorkbook("workbook contains no sheets".to_string()))?;
    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| Error::Spreadsheet(format!("failed to read sheet '{}': {}", name, e)))?;
    Ok((name, range))
}

fn read_sheet<RS: Read + Seek>(workbook: &mut Sheets<RS>, sheet: Option<&str>) -> Result<Table> {
    let (name, range) = read_range(workbook, sheet)?;
    table_from_range(&range)
        .ok_or_else(|| Error::EmptyWorkbook(format!("sheet '{}' has no header row", name)))
}

pub(crate) fn to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::Text(other.to_string()),
    }
}

fn is_blank_row(row: &[Data]) -> bool {
    row.iter().all(|c| to_cell_value(c).is_missing())
}

/// Header row text of a sheet, trailing blank headers dropped
pub(crate) fn header_row(range: &Range<Data>) -> Option<Vec<String>> {
    let row = range.rows().find(|r| !is_blank_row(r))?;
    let mut headers: Vec<String> = row.iter().map(|c| to_cell_value(c).to_string()).collect();
    while headers.last().is_some_and(|h| h.trim().is_empty()) {
        headers.pop();
    }
    Some(headers)
}

fn table_from_range(range: &Range<Data>) -> Option<Table> {
    let mut rows = range.rows().skip_while(|r| is_blank_row(r));
    let header = rows.next()?;
    let mut table = Table::new(header.iter().map(|c| to_cell_value(c).to_string()).collect());
    for row in rows.filter(|r| !is_blank_row(r)) {
        table.push_row(row.iter().map(to_cell_value).collect());
    }
    Some(table)
}
