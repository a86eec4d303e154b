//! Profile storage abstraction trait

use async_trait::async_trait;
use hostwp_upmind::ApiProfile;
use tokio::sync::{watch, RwLock};

use crate::error::CoreResult;

/// Persistent storage for API configuration profiles and the active pointer.
///
/// Platform implementations:
/// - Desktop: settings file under the app config directory
/// - Web backend: database-backed store
///
/// The store holds the full profile list plus at most one active profile
/// id. The active pointer may only name a stored profile; the service
/// layer maintains that invariant.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Load all stored profiles. An empty store yields an empty list.
    async fn load_profiles(&self) -> CoreResult<Vec<ApiProfile>>;

    /// Replace the stored profile list.
    async fn save_profiles(&self, profiles: &[ApiProfile]) -> CoreResult<()>;

    /// Load the active profile id, if one is set.
    async fn load_active_id(&self) -> CoreResult<Option<String>>;

    /// Set or clear the active profile id.
    async fn save_active_id(&self, id: Option<&str>) -> CoreResult<()>;

    /// Subscribe to store changes.
    ///
    /// The receiver's value is a generation counter bumped on every write,
    /// including writes made by other processes sharing the store. A
    /// long-running service watches this to reload configuration without
    /// polling.
    fn subscribe(&self) -> watch::Receiver<u64>;
}

/// In-memory [`ProfileStore`], used by tests and ephemeral setups.
pub struct MemoryProfileStore {
    profiles: RwLock<Vec<ApiProfile>>,
    active_id: RwLock<Option<String>>,
    generation: watch::Sender<u64>,
}

impl MemoryProfileStore {
    #[must_use]
    pub fn new() -> Self {
        let (generation, _) = watch::channel(0);
        Self {
            profiles: RwLock::new(Vec::new()),
            active_id: RwLock::new(None),
            generation,
        }
    }

    fn bump(&self) {
        self.generation.send_modify(|g| *g += 1);
    }
}

impl Default for MemoryProfileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn load_profiles(&self) -> CoreResult<Vec<ApiProfile>> {
        Ok(self.profiles.read().await.clone())
    }

    async fn save_profiles(&self, profiles: &[ApiProfile]) -> CoreResult<()> {
        *self.profiles.write().await = profiles.to_vec();
        self.bump();
        Ok(())
    }

    async fn load_active_id(&self) -> CoreResult<Option<String>> {
        Ok(self.active_id.read().await.clone())
    }

    async fn save_active_id(&self, id: Option<&str>) -> CoreResult<()> {
        *self.active_id.write().await = id.map(ToString::to_string);
        self.bump();
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.generation.subscribe()
    }
}
