//! Fleet reconciliation domain
//!
//! Turns a fleet roster and an availability sheet into a template-shaped
//! list of per-vehicle corrections plus summary statistics.

pub mod model;
pub mod service;
