//! Normalized fleet and availability records

use std::collections::{BTreeMap, BTreeSet};

use frota_types::FieldRole;
use serde::{Deserialize, Serialize};

/// Normalized vehicle identifier (trimmed, uppercased)
pub type Plate = String;

/// Attribute columns reconciled against the availability mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Base,
    CostCenter,
}

impl Attribute {
    pub const ALL: [Attribute; 2] = [Attribute::Base, Attribute::CostCenter];

    pub fn role(self) -> FieldRole {
        match self {
            Attribute::Base => FieldRole::Base,
            Attribute::CostCenter => FieldRole::CostCenter,
        }
    }
}

/// Status labels driving the status rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRules {
    /// Vehicle in service ("ATIVO - BIPANDO")
    #[serde(default = "default_active")]
    pub active: String,
    /// Vehicle parked / available ("FROTA OCIOSA")
    #[serde(default = "default_idle")]
    pub idle: String,
}

fn default_active() -> String {
    "ATIVO - BIPANDO".to_string()
}

fn default_idle() -> String {
    "FROTA OCIOSA".to_string()
}

impl Default for StatusRules {
    fn default() -> Self {
        Self {
            active: default_active(),
            idle: default_idle(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetRecord {
    pub plate: Plate,
    pub status: String,
    pub base: Option<String>,
    pub cost_center: Option<String>,
}

impl FleetRecord {
    pub fn attribute(&self, attribute: Attribute) -> Option<&str> {
        match attribute {
            Attribute::Base => self.base.as_deref(),
            Attribute::CostCenter => self.cost_center.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityRecord {
    pub plate: Plate,
    pub base: Option<String>,
    pub cost_center: Option<String>,
}

impl AvailabilityRecord {
    pub fn attribute(&self, attribute: Attribute) -> Option<&str> {
        match attribute {
            Attribute::Base => self.base.as_deref(),
            Attribute::CostCenter => self.cost_center.as_deref(),
        }
    }
}

/// Fleet rows that survived normalization, in input order
#[derive(Debug, Clone, Default)]
pub struct NormalizedFleet {
    pub records: Vec<FleetRecord>,
    pub has_base: bool,
    pub has_cost_center: bool,
    pub dropped_rows: usize,
}

impl NormalizedFleet {
    pub fn has_attribute(&self, attribute: Attribute) -> bool {
        match attribute {
            Attribute::Base => self.has_base,
            Attribute::CostCenter => self.has_cost_center,
        }
    }

    /// Current value per plate; the last row for a plate wins
    pub fn current_values(&self, attribute: Attribute) -> BTreeMap<Plate, Option<String>> {
        self.records
            .iter()
            .map(|r| (r.plate.clone(), r.attribute(attribute).map(str::to_string)))
            .collect()
    }
}

/// Availability rows that survived normalization, in input order
#[derive(Debug, Clone, Default)]
pub struct NormalizedAvailability {
    pub records: Vec<AvailabilityRecord>,
    pub has_base: bool,
    pub has_cost_center: bool,
    pub dropped_rows: usize,
}

impl NormalizedAvailability {
    pub fn has_attribute(&self, attribute: Attribute) -> bool {
        match attribute {
            Attribute::Base => self.has_base,
            Attribute::CostCenter => self.has_cost_center,
        }
    }

    pub fn plate_set(&self) -> BTreeSet<Plate> {
        self.records.iter().map(|r| r.plate.clone()).collect()
    }

    /// Every non-empty value seen per plate, in encounter order
    pub fn values_by_plate(&self, attribute: Attribute) -> BTreeMap<Plate, Vec<String>> {
        let mut values: BTreeMap<Plate, Vec<String>> = BTreeMap::new();
        for record in &self.records {
            if let Some(value) = record.attribute(attribute) {
                values
                    .entry(record.plate.clone())
                    .or_default()
                    .push(value.to_string());
            }
        }
        values
    }
}
