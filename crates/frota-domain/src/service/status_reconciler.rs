//! Status rule: availability listing decides active vs idle

use std::collections::BTreeSet;

use tracing::debug;

use crate::model::{FleetRecord, Plate, StatusCorrections, StatusRules};

/// Split status mismatches into the two correction sets
///
/// A vehicle marked active but listed as available should be idle; one
/// marked idle but not listed should be active. Statuses must equal the
/// labels byte for byte; anything else is left alone.
pub fn reconcile_status(
    records: &[FleetRecord],
    available: &BTreeSet<Plate>,
    rules: &StatusRules,
) -> StatusCorrections {
    let mut active = BTreeSet::new();
    let mut idle = BTreeSet::new();
    for record in records {
        if record.status == rules.active {
            active.insert(record.plate.clone());
        } else if record.status == rules.idle {
            idle.insert(record.plate.clone());
        }
    }

    let corrections = StatusCorrections {
        to_idle: active.intersection(available).cloned().collect(),
        to_active: idle.difference(available).cloned().collect(),
    };
    debug!(
        active = active.len(),
        idle = idle.len(),
        to_idle = corrections.to_idle.len(),
        to_active = corrections.to_active.len(),
        "status rule applied"
    );
    corrections
}
