//! Infrastructure layer - spreadsheet ingestion and template loading

pub mod csv_loader;
pub mod spreadsheet_loader;
pub mod template_loader;

pub use spreadsheet_loader::{load_table, load_table_from_bytes, SourceFormat};
pub use template_loader::{load_template, parse_template_toml};
