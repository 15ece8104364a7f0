//! Reconciliation engine: two tables and a template in, corrections out

use frota_types::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::model::{
    Attribute, ChangeSet, ColumnAliases, ProjectedTable, ReconciliationSummary, StatusCorrections,
    StatusRules, Table, TargetSchema,
};
use crate::service::attribute_reconciler::reconcile_attribute;
use crate::service::normalizer::{normalize_availability, normalize_fleet};
use crate::service::status_reconciler::reconcile_status;
use crate::service::summary_builder::build_summary;
use crate::service::template_projector::{project_with_roles, resolve_schema_roles};

/// Result of one reconciliation run
#[derive(Debug, Clone, Serialize)]
pub struct Reconciliation {
    pub output: ProjectedTable,
    pub summary: ReconciliationSummary,
    pub corrections: StatusCorrections,
    pub changes: ChangeSet,
}

/// Stateless reconciler; holds only the matching rules
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    pub aliases: ColumnAliases,
    pub statuses: StatusRules,
}

impl Reconciler {
    pub fn new(aliases: ColumnAliases, statuses: StatusRules) -> Self {
        Self { aliases, statuses }
    }

    /// Compare the fleet roster with the availability sheet
    ///
    /// Fails only when a required column (plate, status) cannot be found in
    /// an input or in the template. Base and cost center are reconciled only
    /// when all three of fleet, availability and template carry the column.
    pub fn reconcile(
        &self,
        fleet: &Table,
        availability: &Table,
        schema: &TargetSchema,
    ) -> Result<Reconciliation> {
        let roles = resolve_schema_roles(schema, &self.aliases.template)?;
        let fleet = normalize_fleet(fleet, &self.aliases.fleet)?;
        let availability = normalize_availability(availability, &self.aliases.availability)?;

        let available = availability.plate_set();
        let corrections = reconcile_status(&fleet.records, &available, &self.statuses);

        let mut changes = ChangeSet::default();
        let idle_label = self.statuses.idle.clone();
        let active_label = self.statuses.active.clone();
        for plate in &corrections.to_idle {
            changes.status.insert(plate.clone(), idle_label.clone());
        }
        for plate in &corrections.to_active {
            changes.status.insert(plate.clone(), active_label.clone());
        }

        for attribute in Attribute::ALL {
            let monitored = fleet.has_attribute(attribute)
                && availability.has_attribute(attribute)
                && roles.attribute(attribute).is_some();
            if !monitored {
                debug!(role = %attribute.role(), "attribute not monitored");
                continue;
            }
            *changes.attribute_mut(attribute) = reconcile_attribute(
                &fleet.current_values(attribute),
                &availability.values_by_plate(attribute),
            );
        }

        let output = project_with_roles(schema, &roles, &changes);
        let summary = build_summary(&fleet, &corrections, &changes);
        info!(
            fleet = summary.total_records,
            available = available.len(),
            status_changes = summary.status_changes.count,
            base_changes = summary.base_changes,
            cost_center_changes = summary.cost_center_changes,
            rows = output.len(),
            "reconciliation complete"
        );

        Ok(Reconciliation {
            output,
            summary,
            corrections,
            changes,
        })
    }
}

/// Reconcile with the default aliases and status labels
pub fn reconcile(
    fleet: &Table,
    availability: &Table,
    schema: &TargetSchema,
) -> Result<Reconciliation> {
    Reconciler::default().reconcile(fleet, availability, schema)
}
