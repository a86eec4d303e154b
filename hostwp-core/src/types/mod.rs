//! Core data types

mod plan;
mod sync_report;

pub use plan::HostingPlan;
pub use sync_report::{SyncFailure, SyncReport};
