//! Output template schema

use serde::{Deserialize, Serialize};

/// Default sheet name of the fleet update template
pub const DEFAULT_SHEET_NAME: &str = "Worksheet";

/// Ordered column names the output spreadsheet must follow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSchema {
    pub columns: Vec<String>,
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
}

fn default_sheet_name() -> String {
    DEFAULT_SHEET_NAME.to_string()
}

impl TargetSchema {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            sheet_name: default_sheet_name(),
        }
    }

    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = sheet_name.into();
        self
    }

    /// Built-in layout used when no template file is configured
    pub fn fleet_update() -> Self {
        Self::new(["Dominio", "Base", "Centro de Costo", "Estado"])
    }
}
