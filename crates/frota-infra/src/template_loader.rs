//! Output template loading
//!
//! The template is either a workbook whose header row fixes the output
//! columns, or a TOML file:
//!
//! ```toml
//! sheet_name = "Worksheet"
//! columns = ["Dominio", "Base", "Centro de Costo", "Estado"]
//! ```

use std::path::Path;

use calamine::open_workbook_auto;
use frota_domain::model::schema::DEFAULT_SHEET_NAME;
use frota_domain::model::TargetSchema;
use frota_types::{ConfigError, Error, Result};
use serde::Deserialize;
use tracing::info;

use crate::spreadsheet_loader::{header_row, read_range, SourceFormat};

#[derive(Debug, Deserialize)]
struct TemplateFile {
    columns: Vec<String>,
    sheet_name: Option<String>,
}

/// Load the output column layout from a workbook or TOML file
pub fn load_template(path: &Path, sheet: Option<&str>) -> Result<TargetSchema> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }

    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));
    let schema = if is_toml {
        parse_template_toml(&std::fs::read_to_string(path)?)?
    } else {
        if SourceFormat::from_path(path)? != SourceFormat::Workbook {
            return Err(Error::UnsupportedFormat(path.display().to_string()));
        }
        let mut workbook = open_workbook_auto(path)
            .map_err(|e| Error::Spreadsheet(format!("{}: {}", path.display(), e)))?;
        let (name, range) = read_range(&mut workbook, Some(sheet.unwrap_or(DEFAULT_SHEET_NAME)))?;
        let columns = header_row(&range)
            .ok_or_else(|| Error::EmptyWorkbook(format!("template sheet '{}' has no header row", name)))?;
        TargetSchema::new(columns).with_sheet_name(name)
    };

    info!(path = %path.display(), columns = schema.columns.len(), sheet = %schema.sheet_name, "loaded template");
    Ok(schema)
}

pub fn parse_template_toml(content: &str) -> Result<TargetSchema> {
    let file: TemplateFile = toml::from_str(content)?;
    if file.columns.is_empty() {
        return Err(Error::Config(ConfigError::ParseError(
            "template must list at least one column".to_string(),
        )));
    }
    let schema = TargetSchema::new(file.columns);
    Ok(match file.sheet_name {
        Some(name) => schema.with_sheet_name(name),
        None => schema,
    })
}
