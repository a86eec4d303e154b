//! Business logic service layer

mod profile_service;
mod sync_service;

pub use profile_service::ProfileService;
pub use sync_service::SyncService;

use std::sync::Arc;

use hostwp_upmind::{ApiProfile, UpmindClient};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::traits::{PlanRepository, ProfileStore};

/// Service context holding all dependencies.
///
/// The platform layer creates this context and injects its storage
/// implementations. The Upmind client is rebuilt whenever the active
/// profile changes; there is no global client state.
pub struct ServiceContext {
    /// Profile and active-pointer storage
    pub profile_store: Arc<dyn ProfileStore>,
    /// Local hosting plan repository
    pub plan_repository: Arc<dyn PlanRepository>,
    /// Client for the currently active profile, if any
    client: RwLock<Option<Arc<UpmindClient>>>,
}

impl ServiceContext {
    /// Create a service context with no client configured yet.
    #[must_use]
    pub fn new(
        profile_store: Arc<dyn ProfileStore>,
        plan_repository: Arc<dyn PlanRepository>,
    ) -> Self {
        Self {
            profile_store,
            plan_repository,
            client: RwLock::new(None),
        }
    }

    /// The client for the active profile.
    ///
    /// Every remote operation goes through this accessor so the "no
    /// configuration yet" case surfaces as one uniform, actionable error.
    pub async fn client(&self) -> CoreResult<Arc<UpmindClient>> {
        self.client
            .read()
            .await
            .clone()
            .ok_or(CoreError::NoActiveProfile)
    }

    /// Whether a client is currently configured.
    pub async fn has_client(&self) -> bool {
        self.client.read().await.is_some()
    }

    /// Build and install a client for the given profile.
    pub async fn configure_client(&self, profile: &ApiProfile) -> CoreResult<()> {
        let client = UpmindClient::from_profile(profile)?;
        *self.client.write().await = Some(Arc::new(client));
        log::info!(
            "Upmind client configured for profile '{}' ({})",
            profile.label,
            profile.environment
        );
        Ok(())
    }

    /// Drop the configured client. Remote operations will fail with
    /// [`CoreError::NoActiveProfile`] until a profile is activated again.
    pub async fn clear_client(&self) {
        *self.client.write().await = None;
        log::info!("Upmind client cleared");
    }
}
