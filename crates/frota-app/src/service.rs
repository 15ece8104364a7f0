//! Reconcile use case: tables in, stored correction workbook out

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use chrono::{Local, NaiveDate};
use frota_domain::model::{ReconciliationSummary, StatusRules, Table, TargetSchema};
use frota_domain::service::{Reconciler, Reconciliation};
use frota_infra::load_table;
use frota_store::{Artifact, ArtifactStore, ArtifactToken};
use frota_types::{Error, Result};
use serde::Serialize;
use tracing::{error, info};

use crate::config::Config;
use crate::export::{export_to_xlsx, output_filename};

/// What a caller gets back from one processing request
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutcome {
    pub token: ArtifactToken,
    pub filename: String,
    pub summary: ReconciliationSummary,
    #[serde(skip)]
    pub reconciliation: Reconciliation,
}

pub struct ReconcileService {
    reconciler: Reconciler,
    schema: TargetSchema,
    store: ArtifactStore,
}

impl ReconcileService {
    /// Build the service from config, loading the configured template
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_schema(config, config.schema()?))
    }

    pub fn with_schema(config: &Config, schema: TargetSchema) -> Self {
        Self {
            reconciler: config.reconciler(),
            schema,
            store: ArtifactStore::new(config.artifact_ttl()),
        }
    }

    pub fn schema(&self) -> &TargetSchema {
        &self.schema
    }

    pub fn statuses(&self) -> &StatusRules {
        &self.reconciler.statuses
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Reconcile two tables and store the correction workbook under a fresh token
    pub fn process(&self, fleet: &Table, availability: &Table) -> Result<ProcessOutcome> {
        self.process_on(fleet, availability, Local::now().date_naive())
    }

    pub fn process_on(&self, fleet: &Table, availability: &Table, date: NaiveDate) -> Result<ProcessOutcome> {
        let evicted = self.store.evict_expired();
        if evicted > 0 {
            info!(evicted, "evicted expired artifacts");
        }

        let run = catch_unwind(AssertUnwindSafe(|| self.run(fleet, availability)))
            .map_err(|panic| Error::ProcessingFailed(panic_message(panic.as_ref())))
            .and_then(|r| r);
        let (reconciliation, bytes) = run.map_err(into_boundary_error)?;

        let filename = output_filename(date);
        let token = self.store.put(Artifact::xlsx(filename.clone(), bytes));
        info!(
            token = %token,
            rows = reconciliation.output.len(),
            "stored correction workbook"
        );

        Ok(ProcessOutcome {
            token,
            filename,
            summary: reconciliation.summary.clone(),
            reconciliation,
        })
    }

    /// Load both files from disk, then process them
    pub fn process_files(&self, fleet_path: &Path, availability_path: &Path) -> Result<ProcessOutcome> {
        let fleet = load_table(fleet_path, None)?;
        let availability = load_table(availability_path, None)?;
        self.process(&fleet, &availability)
    }

    /// Hand out the stored workbook; a token works once
    pub fn download(&self, token: &ArtifactToken) -> Result<Artifact> {
        self.store.take(token)
    }

    fn run(&self, fleet: &Table, availability: &Table) -> Result<(Reconciliation, Vec<u8>)> {
        let reconciliation = self.reconciler.reconcile(fleet, availability, &self.schema)?;
        let bytes = export_to_xlsx(&reconciliation.output, &self.schema.sheet_name)?;
        Ok((reconciliation, bytes))
    }
}

/// Data problems pass through; anything else becomes a generic failure
fn into_boundary_error(err: Error) -> Error {
    match err {
        e @ Error::ProcessingFailed(_) => {
            error!(error = %e, "processing failed");
            e
        }
        e if e.is_user_error() => e,
        e => {
            error!(error = %e, "processing failed");
            Error::ProcessingFailed(e.to_string())
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected internal error".to_string()
    }
}
