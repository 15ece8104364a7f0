//! Error types for frota-checker

use thiserror::Error;

use crate::{FieldRole, TableKind};

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Artifact delivery errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArtifactError {
    #[error("No artifact is stored under token {0}")]
    NotFound(String),

    #[error("Artifact {0} expired before it was downloaded")]
    Expired(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Excel export error: {0}")]
    Excel(String),

    #[error("Missing '{role}' column in {table}")]
    MissingColumn { role: FieldRole, table: TableKind },

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Workbook has no usable sheet: {0}")]
    EmptyWorkbook(String),

    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

impl Error {
    /// True when the failure was caused by the uploaded data rather than the system
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::MissingColumn { .. }
                | Error::Spreadsheet(_)
                | Error::Csv(_)
                | Error::UnsupportedFormat(_)
                | Error::EmptyWorkbook(_)
                | Error::FileNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
