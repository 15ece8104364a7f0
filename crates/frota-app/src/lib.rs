//! Application service layer - config, export, reconcile use case

pub mod config;
pub mod export;
pub mod service;

pub use config::Config;
pub use service::{ProcessOutcome, ReconcileService};
