//! Two-way plan/product synchronization service
//!
//! Push mirrors local plans into the remote Upmind catalog; pull mirrors
//! the remote catalog into local plans. Sync is last-write-wins in the
//! chosen direction with no conflict detection; local presentation fields
//! never leave the local store.

use std::sync::Arc;

use chrono::Utc;
use hostwp_upmind::UpmindError;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{HostingPlan, SyncReport};

/// Plan synchronization service
pub struct SyncService {
    ctx: Arc<ServiceContext>,
}

impl SyncService {
    /// Create a sync service instance
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Push one plan to the remote catalog.
    ///
    /// An unlinked plan creates a remote product and records its id; a
    /// linked plan overwrites the remote product in full. On success the
    /// linkage and sync timestamp are persisted locally.
    pub async fn push_plan(&self, plan_id: &str) -> CoreResult<HostingPlan> {
        let client = self.ctx.client().await?;
        let mut plan = self
            .ctx
            .plan_repository
            .find_by_id(plan_id)
            .await?
            .ok_or_else(|| CoreError::PlanNotFound(plan_id.to_string()))?;

        let product = match plan.upmind_product_id.clone() {
            Some(remote_id) => {
                client
                    .update_product(&remote_id, &plan.to_product_update())
                    .await?
            }
            None => client.create_product(&plan.to_product_payload()).await?,
        };

        plan.upmind_product_id = Some(product.id.clone());
        // A manual push re-enables bulk sync for a previously detached plan.
        plan.sync_enabled = true;
        let now = Utc::now();
        plan.last_synced_at = Some(now);
        plan.updated_at = now;

        // The remote write already landed; a failure here leaves the two
        // sides divergent until the next successful push.
        if let Err(e) = self.ctx.plan_repository.save(&plan).await {
            log::error!(
                "Plan '{}' pushed to product {} but the local linkage could not be saved: {e}",
                plan.name,
                product.id
            );
            return Err(e);
        }

        log::info!("Plan '{}' pushed to product {}", plan.name, product.id);
        Ok(plan)
    }

    /// Push every sync-enabled plan, continuing past per-plan failures.
    pub async fn push_all(&self) -> CoreResult<SyncReport> {
        // Fail fast when no profile is active rather than reporting every
        // plan as individually failed.
        self.ctx.client().await?;

        let plans = self.ctx.plan_repository.find_all().await?;
        let mut report = SyncReport::default();
        for plan in plans.into_iter().filter(|p| p.sync_enabled) {
            match self.push_plan(&plan.id).await {
                Ok(_) => report.record_success(),
                Err(e) => {
                    log_sync_failure("push", &plan.name, &e);
                    report.record_failure(plan.id, plan.name, e.to_string());
                }
            }
        }
        log::info!(
            "Push finished: {} ok, {} failed",
            report.success_count,
            report.failed_count
        );
        Ok(report)
    }

    /// Pull one linked plan from the remote catalog.
    ///
    /// Fails fast with [`CoreError::NotSynced`] when the plan was never
    /// pushed, and with [`CoreError::ProductNotFound`] when its remote
    /// product no longer exists.
    pub async fn pull_plan(&self, plan_id: &str) -> CoreResult<HostingPlan> {
        let client = self.ctx.client().await?;
        let mut plan = self
            .ctx
            .plan_repository
            .find_by_id(plan_id)
            .await?
            .ok_or_else(|| CoreError::PlanNotFound(plan_id.to_string()))?;
        let Some(remote_id) = plan.upmind_product_id.clone() else {
            return Err(CoreError::NotSynced(plan.name));
        };

        let products = client.list_products().await?;
        let Some(product) = products.into_iter().find(|p| p.id == remote_id) else {
            return Err(CoreError::ProductNotFound(remote_id));
        };

        plan.apply_remote(&product);
        self.ctx.plan_repository.save(&plan).await?;
        log::info!("Plan '{}' pulled from product {}", plan.name, remote_id);
        Ok(plan)
    }

    /// Pull the whole remote catalog.
    ///
    /// Products linked to a local plan overwrite that plan's shared
    /// fields; unknown products create new local plans with default
    /// presentation fields. Per-product failures are collected, not fatal.
    pub async fn pull_all(&self) -> CoreResult<SyncReport> {
        let client = self.ctx.client().await?;
        let products = client.list_products().await?;

        let mut report = SyncReport::default();
        for product in products {
            match self.ctx.plan_repository.find_by_remote_id(&product.id).await {
                Ok(Some(mut plan)) => {
                    plan.apply_remote(&product);
                    match self.ctx.plan_repository.save(&plan).await {
                        Ok(()) => report.record_success(),
                        Err(e) => {
                            log_sync_failure("pull", &plan.name, &e);
                            report.record_failure(plan.id, plan.name, e.to_string());
                        }
                    }
                }
                Ok(None) => {
                    let plan = HostingPlan::from_remote(&product);
                    match self.ctx.plan_repository.save(&plan).await {
                        Ok(()) => report.record_success(),
                        Err(e) => {
                            log_sync_failure("pull", &plan.name, &e);
                            report.record_failure(plan.id, plan.name, e.to_string());
                        }
                    }
                }
                Err(e) => {
                    log_sync_failure("pull", &product.name, &e);
                    report.record_failure(String::new(), product.name, e.to_string());
                }
            }
        }
        log::info!(
            "Pull finished: {} ok, {} failed",
            report.success_count,
            report.failed_count
        );
        Ok(report)
    }

    /// Remove a plan's remote counterpart and clear its linkage, taking
    /// the plan out of bulk sync.
    ///
    /// A product already gone remotely (404) is treated as detached. The
    /// plan itself stays in the local catalog.
    pub async fn detach_plan(&self, plan_id: &str) -> CoreResult<HostingPlan> {
        let client = self.ctx.client().await?;
        let mut plan = self
            .ctx
            .plan_repository
            .find_by_id(plan_id)
            .await?
            .ok_or_else(|| CoreError::PlanNotFound(plan_id.to_string()))?;
        let Some(remote_id) = plan.upmind_product_id.clone() else {
            return Err(CoreError::NotSynced(plan.name));
        };

        match client.delete_product(&remote_id).await {
            Ok(()) => {}
            Err(UpmindError::Api { status: 404, .. }) => {
                log::warn!("Product {remote_id} already gone, detaching plan '{}'", plan.name);
            }
            Err(e) => return Err(e.into()),
        }

        plan.upmind_product_id = None;
        plan.sync_enabled = false;
        plan.last_synced_at = None;
        plan.updated_at = Utc::now();
        self.ctx.plan_repository.save(&plan).await?;
        log::info!("Plan '{}' detached from product {remote_id}", plan.name);
        Ok(plan)
    }
}

fn log_sync_failure(direction: &str, name: &str, err: &CoreError) {
    if err.is_expected() {
        log::warn!("Failed to {direction} plan '{name}': {err}");
    } else {
        log::error!("Failed to {direction} plan '{name}': {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::test_utils::{create_sync_fixture, test_plan};
    use crate::traits::PlanRepository;

    #[tokio::test]
    async fn push_unlinked_plan_creates_product_and_records_linkage() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(201).set_body_json(
                json!({"data": {"id": "prod-7", "name": "Starter", "price": 4.99}}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let (service, repo) = create_sync_fixture(&server).await;
        let plan = test_plan("Starter", 4.99);
        repo.save(&plan).await.unwrap();

        let pushed = service.push_plan(&plan.id).await.unwrap();
        assert_eq!(pushed.upmind_product_id.as_deref(), Some("prod-7"));
        assert!(pushed.last_synced_at.is_some());

        let stored = repo.find_by_id(&plan.id).await.unwrap().unwrap();
        assert_eq!(stored.upmind_product_id.as_deref(), Some("prod-7"));
    }

    #[tokio::test]
    async fn push_linked_plan_updates_existing_product() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/products/prod-7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"data": {"id": "prod-7", "name": "Starter", "price": 5.99}}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let (service, repo) = create_sync_fixture(&server).await;
        let mut plan = test_plan("Starter", 5.99);
        plan.upmind_product_id = Some("prod-7".to_string());
        repo.save(&plan).await.unwrap();

        service.push_plan(&plan.id).await.unwrap();
    }

    #[tokio::test]
    async fn push_unknown_plan_fails() {
        let server = MockServer::start().await;
        let (service, _repo) = create_sync_fixture(&server).await;
        let err = service.push_plan("ghost").await.unwrap_err();
        assert!(matches!(err, CoreError::PlanNotFound(_)));
    }

    #[tokio::test]
    async fn push_surfaces_local_save_failure_after_remote_write() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(201).set_body_json(
                json!({"data": {"id": "prod-9", "name": "Pro", "price": 29.0}}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let (service, repo) = create_sync_fixture(&server).await;
        let plan = test_plan("Pro", 29.0);
        repo.save(&plan).await.unwrap();
        repo.set_save_error(Some("disk full".to_string())).await;

        let err = service.push_plan(&plan.id).await.unwrap_err();
        assert!(matches!(err, CoreError::StorageError(_)));
    }

    #[tokio::test]
    async fn push_all_skips_sync_disabled_and_isolates_failures() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(201).set_body_json(
                json!({"data": {"id": "prod-1", "name": "x", "price": 1.0}}),
            ))
            .mount(&server)
            .await;

        let (service, repo) = create_sync_fixture(&server).await;
        let synced = test_plan("Synced", 1.0);
        let mut skipped = test_plan("Skipped", 2.0);
        skipped.sync_enabled = false;
        // NaN price fails the facade's local validation, no request sent.
        let broken = test_plan("Broken", f64::NAN);
        repo.save(&synced).await.unwrap();
        repo.save(&skipped).await.unwrap();
        repo.save(&broken).await.unwrap();

        let report = service.push_all().await.unwrap();
        assert_eq!(report.success_count, 1);
        assert_eq!(report.failed_count, 1);
        assert_eq!(report.failures[0].name, "Broken");
    }

    #[tokio::test]
    async fn push_all_without_active_profile_fails_fast() {
        let (service, repo) = crate::test_utils::create_unconfigured_sync_service();
        repo.save(&test_plan("Starter", 4.99)).await.unwrap();
        let err = service.push_all().await.unwrap_err();
        assert!(matches!(err, CoreError::NoActiveProfile));
    }

    #[tokio::test]
    async fn pull_plan_requires_linkage() {
        let server = MockServer::start().await;
        let (service, repo) = create_sync_fixture(&server).await;
        let plan = test_plan("Starter", 4.99);
        repo.save(&plan).await.unwrap();

        let err = service.pull_plan(&plan.id).await.unwrap_err();
        assert!(matches!(err, CoreError::NotSynced(_)));
    }

    #[tokio::test]
    async fn pull_plan_overwrites_shared_fields_only() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [
                {"id": "prod-7", "name": "Starter v2", "price": "6.99", "is_active": 0}
            ]})))
            .mount(&server)
            .await;

        let (service, repo) = create_sync_fixture(&server).await;
        let mut plan = test_plan("Starter", 4.99);
        plan.upmind_product_id = Some("prod-7".to_string());
        plan.icon_emoji = Some("⚡".to_string());
        plan.is_popular = true;
        plan.sort_order = 3;
        repo.save(&plan).await.unwrap();

        let pulled = service.pull_plan(&plan.id).await.unwrap();
        assert_eq!(pulled.name, "Starter v2");
        assert!((pulled.price - 6.99).abs() < f64::EPSILON);
        assert!(!pulled.is_active);
        assert_eq!(pulled.icon_emoji.as_deref(), Some("⚡"));
        assert!(pulled.is_popular);
        assert_eq!(pulled.sort_order, 3);
    }

    #[tokio::test]
    async fn pull_plan_missing_remote_product_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;

        let (service, repo) = create_sync_fixture(&server).await;
        let mut plan = test_plan("Starter", 4.99);
        plan.upmind_product_id = Some("prod-gone".to_string());
        repo.save(&plan).await.unwrap();

        let err = service.pull_plan(&plan.id).await.unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(_)));
    }

    #[tokio::test]
    async fn pull_all_updates_linked_and_creates_unknown() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [
                {"id": "prod-7", "name": "Starter v2", "price": 6.99},
                {"id": "prod-new", "name": "Cloud VPS", "price": 19.0}
            ]})))
            .mount(&server)
            .await;

        let (service, repo) = create_sync_fixture(&server).await;
        let mut linked = test_plan("Starter", 4.99);
        linked.upmind_product_id = Some("prod-7".to_string());
        repo.save(&linked).await.unwrap();

        let report = service.pull_all().await.unwrap();
        assert_eq!(report.success_count, 2);
        assert!(report.is_clean());

        let updated = repo.find_by_id(&linked.id).await.unwrap().unwrap();
        assert_eq!(updated.name, "Starter v2");

        let created = repo.find_by_remote_id("prod-new").await.unwrap().unwrap();
        assert_eq!(created.slug, "cloud-vps");
        assert!(created.last_synced_at.is_some());
    }

    #[tokio::test]
    async fn detach_plan_deletes_remote_and_clears_linkage() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/products/prod-7"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let (service, repo) = create_sync_fixture(&server).await;
        let mut plan = test_plan("Starter", 4.99);
        plan.upmind_product_id = Some("prod-7".to_string());
        plan.last_synced_at = Some(Utc::now());
        repo.save(&plan).await.unwrap();

        let detached = service.detach_plan(&plan.id).await.unwrap();
        assert!(detached.upmind_product_id.is_none());
        assert!(!detached.sync_enabled);
        assert!(detached.last_synced_at.is_none());
    }

    #[tokio::test]
    async fn detach_tolerates_already_deleted_remote_product() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/products/prod-7"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let (service, repo) = create_sync_fixture(&server).await;
        let mut plan = test_plan("Starter", 4.99);
        plan.upmind_product_id = Some("prod-7".to_string());
        repo.save(&plan).await.unwrap();

        let detached = service.detach_plan(&plan.id).await.unwrap();
        assert!(detached.upmind_product_id.is_none());
    }
}
