//! CLI definition using clap

use clap::{Parser, Subcommand, ValueEnum};
use frota_types::{OutputFormat, TableKind};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "frota-checker")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Reconcile fleet vehicle status against the availability sheet")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// File kind for `inspect`
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InputKind {
    Fleet,
    Availability,
    Template,
}

impl From<InputKind> for TableKind {
    fn from(kind: InputKind) -> Self {
        match kind {
            InputKind::Fleet => TableKind::Fleet,
            InputKind::Availability => TableKind::Availability,
            InputKind::Template => TableKind::Template,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare fleet and availability files and write the correction workbook
    Reconcile {
        /// Fleet roster (xlsx, xls, ods or csv)
        #[arg(long)]
        fleet: PathBuf,

        /// Availability export (xlsx, xls, ods or csv)
        #[arg(long)]
        availability: PathBuf,

        /// Output template (xlsx header row or TOML). Uses config value if not specified.
        #[arg(long, short = 't')]
        template: Option<PathBuf>,

        /// Template sheet holding the header row
        #[arg(long)]
        sheet: Option<String>,

        /// Output workbook path (default: dated name in the output directory)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Also write the text summary report to this file
        #[arg(long)]
        report: Option<PathBuf>,

        /// Include the workbook as base64 in JSON output
        #[arg(long)]
        embed: bool,
    },

    /// Show the output template columns and the roles they map to
    Schema {
        /// Template file. Uses config value if not specified.
        #[arg(long, short = 't')]
        template: Option<PathBuf>,

        /// Template sheet holding the header row
        #[arg(long)]
        sheet: Option<String>,
    },

    /// Show the headers of an input file and which roles they resolve to
    Inspect {
        /// Spreadsheet or CSV file
        file: PathBuf,

        /// Sheet to read (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,

        /// Which alias set to resolve headers with
        #[arg(long, short = 'k', value_enum, default_value = "fleet")]
        kind: InputKind,
    },

    /// Configure settings
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default output template
        #[arg(long)]
        set_template: Option<PathBuf>,

        /// Set template sheet name
        #[arg(long)]
        set_sheet: Option<String>,

        /// Set default output format (json, table)
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set directory correction workbooks are written to
        #[arg(long)]
        set_output_dir: Option<PathBuf>,

        /// Set how long a generated workbook stays downloadable (seconds)
        #[arg(long)]
        set_ttl: Option<u64>,

        /// Reset to default configuration
        #[arg(long)]
        reset: bool,
    },
}
