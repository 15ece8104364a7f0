//! Domain services

pub mod attribute_reconciler;
pub mod column_resolver;
pub mod engine;
pub mod normalizer;
pub mod report;
pub mod status_reconciler;
pub mod summary_builder;
pub mod template_projector;

pub use attribute_reconciler::{mode, reconcile_attribute};
pub use column_resolver::{normalize_header, resolve, resolve_index, ColumnResolver};
pub use engine::{reconcile, Reconciler, Reconciliation};
pub use normalizer::{normalize_availability, normalize_fleet, normalize_value, raw_value};
pub use report::{generate_summary_report, truncate_str};
pub use status_reconciler::reconcile_status;
pub use summary_builder::{build_summary, percentage};
pub use template_projector::{project, resolve_schema_roles, SchemaRoles};
