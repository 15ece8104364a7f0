//! Domain model types

pub mod aliases;
pub mod changes;
pub mod records;
pub mod schema;
pub mod summary;
pub mod table;

pub use aliases::{ColumnAliases, RoleAliases};
pub use changes::{ChangeSet, ProjectedTable, StatusCorrections};
pub use records::{
    Attribute, AvailabilityRecord, FleetRecord, NormalizedAvailability, NormalizedFleet, Plate,
    StatusRules,
};
pub use schema::TargetSchema;
pub use summary::{ChartData, ReconciliationSummary, StatusShare, Tally};
pub use table::{CellValue, Table};
