use serde::{Deserialize, Serialize};

/// Logical field monitored by the reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    Plate,
    Status,
    Base,
    CostCenter,
}

impl FieldRole {
    pub const ALL: [FieldRole; 4] = [
        FieldRole::Plate,
        FieldRole::Status,
        FieldRole::Base,
        FieldRole::CostCenter,
    ];

    /// Roles that must resolve for a reconciliation to run
    pub fn is_required(self) -> bool {
        matches!(self, FieldRole::Plate | FieldRole::Status)
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldRole::Plate => "Plate",
            FieldRole::Status => "Status",
            FieldRole::Base => "Base",
            FieldRole::CostCenter => "Cost Center",
        }
    }
}

impl std::fmt::Display for FieldRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which input a column lookup was made against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Fleet,
    Availability,
    Template,
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableKind::Fleet => write!(f, "fleet file"),
            TableKind::Availability => write!(f, "availability file"),
            TableKind::Template => write!(f, "output template"),
        }
    }
}
