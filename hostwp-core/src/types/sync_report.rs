//! Bulk sync outcome reporting.

use serde::{Deserialize, Serialize};

/// One plan that failed during a bulk sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncFailure {
    /// Local plan id (empty for remote products with no local plan yet).
    pub plan_id: String,
    /// Display name, for the UI listing.
    pub name: String,
    /// Human-readable failure reason.
    pub reason: String,
}

/// Aggregate result of a bulk push or pull.
///
/// Bulk operations never abort on the first failure; each item is
/// attempted and the report carries the full outcome.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    /// Number of plans synced successfully.
    pub success_count: usize,
    /// Number of plans that failed.
    pub failed_count: usize,
    /// Details for every failure.
    pub failures: Vec<SyncFailure>,
}

impl SyncReport {
    pub(crate) fn record_success(&mut self) {
        self.success_count += 1;
    }

    pub(crate) fn record_failure(
        &mut self,
        plan_id: impl Into<String>,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) {
        self.failed_count += 1;
        self.failures.push(SyncFailure {
            plan_id: plan_id.into(),
            name: name.into(),
            reason: reason.into(),
        });
    }

    /// Whether every attempted item succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed_count == 0
    }
}
