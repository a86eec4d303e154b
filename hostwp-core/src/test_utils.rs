//! Test helper module
//!
//! Provides mock implementations and convenient test factory methods.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use hostwp_upmind::{ApiProfile, Environment, NewProfile};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::{ProfileService, ServiceContext, SyncService};
use crate::traits::{MemoryProfileStore, PlanRepository};
use crate::types::HostingPlan;

// ===== MockPlanRepository =====

pub struct MockPlanRepository {
    plans: RwLock<HashMap<String, HostingPlan>>,
    /// If Some, save returns this error (for testing cleanup paths)
    save_error: RwLock<Option<String>>,
}

impl MockPlanRepository {
    pub fn new() -> Self {
        Self {
            plans: RwLock::new(HashMap::new()),
            save_error: RwLock::new(None),
        }
    }

    pub async fn set_save_error(&self, err: Option<String>) {
        *self.save_error.write().await = err;
    }
}

#[async_trait]
impl PlanRepository for MockPlanRepository {
    async fn find_all(&self) -> CoreResult<Vec<HostingPlan>> {
        Ok(self.plans.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<HostingPlan>> {
        Ok(self.plans.read().await.get(id).cloned())
    }

    async fn find_by_remote_id(&self, remote_id: &str) -> CoreResult<Option<HostingPlan>> {
        Ok(self
            .plans
            .read()
            .await
            .values()
            .find(|p| p.upmind_product_id.as_deref() == Some(remote_id))
            .cloned())
    }

    async fn save(&self, plan: &HostingPlan) -> CoreResult<()> {
        if let Some(ref msg) = *self.save_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        self.plans
            .write()
            .await
            .insert(plan.id.clone(), plan.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> CoreResult<()> {
        self.plans.write().await.remove(id);
        Ok(())
    }
}

// ===== Factory methods =====

/// Create a test `ServiceContext` with in-memory storage.
pub fn create_test_context() -> (
    Arc<ServiceContext>,
    Arc<MemoryProfileStore>,
    Arc<MockPlanRepository>,
) {
    let profile_store = Arc::new(MemoryProfileStore::new());
    let plan_repo = Arc::new(MockPlanRepository::new());
    let ctx = Arc::new(ServiceContext::new(
        profile_store.clone(),
        plan_repo.clone(),
    ));
    (ctx, profile_store, plan_repo)
}

/// Create a test `ProfileService`.
pub fn create_test_profile_service() -> (ProfileService, Arc<ServiceContext>) {
    let (ctx, _store, _repo) = create_test_context();
    (ProfileService::new(ctx.clone()), ctx)
}

/// Create a `SyncService` whose client targets the given stub server.
pub async fn create_sync_fixture(
    server: &wiremock::MockServer,
) -> (SyncService, Arc<MockPlanRepository>) {
    let (ctx, _store, repo) = create_test_context();
    let profile = test_profile_for(&server.uri());
    ctx.configure_client(&profile).await.unwrap();
    (SyncService::new(ctx), repo)
}

/// Create a `SyncService` with no client configured.
pub fn create_unconfigured_sync_service() -> (SyncService, Arc<MockPlanRepository>) {
    let (ctx, _store, repo) = create_test_context();
    (SyncService::new(ctx), repo)
}

/// A valid creation payload pointing at a placeholder host.
pub fn test_new_profile(label: &str) -> NewProfile {
    NewProfile {
        label: label.to_string(),
        base_url: "https://api.upmind.example".to_string(),
        token: "test-token-12345".to_string(),
        brand_id: None,
        environment: Environment::Development,
        timeout_secs: None,
        retry_attempts: None,
    }
}

/// A validated profile targeting `base_url`, with retries disabled so
/// failure tests finish in one round trip.
pub fn test_profile_for(base_url: &str) -> ApiProfile {
    ApiProfile::from_new(NewProfile {
        base_url: base_url.to_string(),
        retry_attempts: Some(1),
        ..test_new_profile("Stub")
    })
    .unwrap()
}

/// A fresh plan with the given name and price.
pub fn test_plan(name: &str, price: f64) -> HostingPlan {
    HostingPlan::new(name, price)
}
