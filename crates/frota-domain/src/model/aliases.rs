//! Header aliases per logical field

use frota_types::{FieldRole, TableKind};
use serde::{Deserialize, Serialize};

/// Candidate header names for each role, tried in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAliases {
    #[serde(default)]
    pub plate: Vec<String>,
    #[serde(default)]
    pub status: Vec<String>,
    #[serde(default)]
    pub base: Vec<String>,
    #[serde(default)]
    pub cost_center: Vec<String>,
}

impl RoleAliases {
    pub fn for_role(&self, role: FieldRole) -> &[String] {
        match role {
            FieldRole::Plate => &self.plate,
            FieldRole::Status => &self.status,
            FieldRole::Base => &self.base,
            FieldRole::CostCenter => &self.cost_center,
        }
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn base_names() -> Vec<String> {
    names(&["Base", "Base Operacional"])
}

fn cost_center_names() -> Vec<String> {
    names(&["Centro de Custo", "Centro de Costo", "Centro Custo", "Cost Center", "CC"])
}

fn default_fleet() -> RoleAliases {
    RoleAliases {
        plate: names(&["Placa", "Plate", "Dominio", "Patente"]),
        status: names(&["Estado", "Status", "Situação"]),
        base: base_names(),
        cost_center: cost_center_names(),
    }
}

fn default_availability() -> RoleAliases {
    RoleAliases {
        plate: names(&["Veículo", "Placa", "Plate", "Dominio"]),
        status: Vec::new(),
        base: base_names(),
        cost_center: cost_center_names(),
    }
}

fn default_template() -> RoleAliases {
    RoleAliases {
        plate: names(&["Dominio", "Placa", "Plate"]),
        status: names(&["Estado", "Status"]),
        base: names(&["Base"]),
        cost_center: names(&["Centro de Costo", "Centro de Custo", "Cost Center"]),
    }
}

/// Aliases for the fleet roster, the availability sheet and the output template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnAliases {
    #[serde(default = "default_fleet")]
    pub fleet: RoleAliases,
    #[serde(default = "default_availability")]
    pub availability: RoleAliases,
    #[serde(default = "default_template")]
    pub template: RoleAliases,
}

impl Default for ColumnAliases {
    fn default() -> Self {
        Self {
            fleet: default_fleet(),
            availability: default_availability(),
            template: default_template(),
        }
    }
}

impl ColumnAliases {
    pub fn for_table(&self, table: TableKind) -> &RoleAliases {
        match table {
            TableKind::Fleet => &self.fleet,
            TableKind::Availability => &self.availability,
            TableKind::Template => &self.template,
        }
    }
}
