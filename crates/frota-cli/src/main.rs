//! Frota Checker - fleet status reconciliation against availability sheets
//!
//! Compares the fleet roster with the daily availability export and writes
//! a correction workbook in the layout of the fleet system's import template.

mod cli;
mod commands;
mod logging;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
