//! Hosting plan persistence abstraction trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::HostingPlan;

/// Persistent storage for local hosting plans.
///
/// Plans are the local side of the product catalog; each one may be linked
/// to a remote Upmind product through `upmind_product_id`.
#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// All stored plans.
    async fn find_all(&self) -> CoreResult<Vec<HostingPlan>>;

    /// Look up a plan by its local id.
    async fn find_by_id(&self, id: &str) -> CoreResult<Option<HostingPlan>>;

    /// Look up the plan linked to a remote product id, if any.
    async fn find_by_remote_id(&self, remote_id: &str) -> CoreResult<Option<HostingPlan>>;

    /// Insert or update a plan, keyed by its local id.
    async fn save(&self, plan: &HostingPlan) -> CoreResult<()>;

    /// Delete a plan by its local id. Deleting a missing plan is a no-op.
    async fn delete(&self, id: &str) -> CoreResult<()>;
}
