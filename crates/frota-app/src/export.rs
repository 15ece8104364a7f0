//! Excel export of the correction table

use chrono::NaiveDate;
use frota_domain::model::ProjectedTable;
use frota_types::{Error, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

const MIN_COLUMN_WIDTH: usize = 12;
const MAX_COLUMN_WIDTH: usize = 40;

/// Correction workbook name for a given day, e.g. `vehicle_fleet_update_16102026.xlsx`
pub fn output_filename(date: NaiveDate) -> String {
    format!("vehicle_fleet_update_{}.xlsx", date.format("%d%m%Y"))
}

/// Serialize the projected rows into an in-memory xlsx workbook
pub fn export_to_xlsx(table: &ProjectedTable, sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    write_corrections_sheet(sheet, table, sheet_name)?;

    workbook
        .save_to_buffer()
        .map_err(|e| Error::Excel(e.to_string()))
}

fn write_corrections_sheet(sheet: &mut Worksheet, table: &ProjectedTable, sheet_name: &str) -> Result<()> {
    sheet
        .set_name(sheet_name)
        .map_err(|e| Error::Excel(e.to_string()))?;

    let header_format = Format::new().set_bold();

    for (col, header) in table.columns.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, header, &header_format)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    for (i, row) in table.rows.iter().enumerate() {
        let row_num = (i + 1) as u32;
        for (col, value) in row.iter().enumerate() {
            // Unchanged cells stay blank
            if value.is_empty() {
                continue;
            }
            sheet
                .write_string(row_num, col as u16, value)
                .map_err(|e| Error::Excel(e.to_string()))?;
        }
    }

    for (col, header) in table.columns.iter().enumerate() {
        let widest = table
            .rows
            .iter()
            .filter_map(|r| r.get(col))
            .map(|v| v.chars().count())
            .chain(std::iter::once(header.chars().count()))
            .max()
            .unwrap_or(0);
        let width = (widest + 2).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH);
        sheet
            .set_column_width(col as u16, width as f64)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    Ok(())
}
