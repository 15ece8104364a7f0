//! Detected corrections and the projected output table

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::records::{Attribute, Plate};

/// Plates whose status must flip
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCorrections {
    /// Marked active but listed as available
    pub to_idle: BTreeSet<Plate>,
    /// Marked idle but not listed as available
    pub to_active: BTreeSet<Plate>,
}

impl StatusCorrections {
    pub fn total(&self) -> usize {
        self.to_idle.len() + self.to_active.len()
    }
}

/// Corrected target value per plate, per monitored field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    pub status: BTreeMap<Plate, String>,
    pub base: BTreeMap<Plate, String>,
    pub cost_center: BTreeMap<Plate, String>,
}

impl ChangeSet {
    pub fn attribute(&self, attribute: Attribute) -> &BTreeMap<Plate, String> {
        match attribute {
            Attribute::Base => &self.base,
            Attribute::CostCenter => &self.cost_center,
        }
    }

    pub fn attribute_mut(&mut self, attribute: Attribute) -> &mut BTreeMap<Plate, String> {
        match attribute {
            Attribute::Base => &mut self.base,
            Attribute::CostCenter => &mut self.cost_center,
        }
    }

    /// Every plate with at least one correction, ascending
    pub fn changed_plates(&self) -> BTreeSet<&str> {
        self.status
            .keys()
            .chain(self.base.keys())
            .chain(self.cost_center.keys())
            .map(String::as_str)
            .collect()
    }

    /// Number of distinct fields flagged for a plate
    pub fn kinds_for(&self, plate: &str) -> usize {
        [&self.status, &self.base, &self.cost_center]
            .iter()
            .filter(|m| m.contains_key(plate))
            .count()
    }

    pub fn multi_change_count(&self) -> usize {
        self.changed_plates()
            .into_iter()
            .filter(|p| self.kinds_for(p) > 1)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_empty() && self.base.is_empty() && self.cost_center.is_empty()
    }
}

/// Rows shaped by the target schema; every row has one cell per column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ProjectedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row).and_then(|r| r.get(col)).map(String::as_str)
    }
}
