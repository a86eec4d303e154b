//! Profile management service
//!
//! Owns the profile list, the active pointer, and the lifecycle of the
//! Upmind client bound to the active profile.

use std::sync::Arc;

use hostwp_upmind::{
    ApiProfile, FieldViolation, NewProfile, ProfileUpdate, ProfileValidationError,
};
use tokio::sync::watch;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;

/// Profile management service
pub struct ProfileService {
    ctx: Arc<ServiceContext>,
}

impl ProfileService {
    /// Create a profile service instance
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Load the store and (re)configure the client from the active profile.
    ///
    /// Called at startup and whenever the store's change notification
    /// fires, so external writes to a shared store take effect without a
    /// restart. An active pointer referencing a deleted profile is healed
    /// by clearing it.
    pub async fn reload(&self) -> CoreResult<()> {
        let profiles = self.ctx.profile_store.load_profiles().await?;
        let active_id = self.ctx.profile_store.load_active_id().await?;

        match active_id {
            Some(id) => {
                if let Some(profile) = profiles.iter().find(|p| p.id == id) {
                    self.ctx.configure_client(profile).await?;
                } else {
                    log::warn!("Active profile {id} no longer exists, clearing pointer");
                    self.ctx.profile_store.save_active_id(None).await?;
                    self.ctx.clear_client().await;
                }
            }
            None => self.ctx.clear_client().await,
        }
        Ok(())
    }

    /// All stored profiles.
    pub async fn list(&self) -> CoreResult<Vec<ApiProfile>> {
        self.ctx.profile_store.load_profiles().await
    }

    /// The currently active profile, if one is set.
    pub async fn active_profile(&self) -> CoreResult<Option<ApiProfile>> {
        let Some(active_id) = self.ctx.profile_store.load_active_id().await? else {
            return Ok(None);
        };
        let profiles = self.ctx.profile_store.load_profiles().await?;
        Ok(profiles.into_iter().find(|p| p.id == active_id))
    }

    /// Add a profile. The first profile in an empty store becomes active
    /// immediately.
    ///
    /// The label is required here; the connection fields are validated by
    /// the profile itself, with every violation reported at once.
    pub async fn add(&self, new: NewProfile) -> CoreResult<ApiProfile> {
        if new.label.trim().is_empty() {
            return Err(CoreError::ProfileValidation(ProfileValidationError {
                violations: vec![FieldViolation {
                    field: "label".to_string(),
                    reason: "is required".to_string(),
                }],
            }));
        }
        let profile = ApiProfile::from_new(new)?;

        let mut profiles = self.ctx.profile_store.load_profiles().await?;
        let first = profiles.is_empty();
        profiles.push(profile.clone());
        self.ctx.profile_store.save_profiles(&profiles).await?;

        if first {
            self.ctx
                .profile_store
                .save_active_id(Some(&profile.id))
                .await?;
            self.ctx.configure_client(&profile).await?;
            log::info!("First profile '{}' added and activated", profile.label);
        } else {
            log::info!("Profile '{}' added", profile.label);
        }
        Ok(profile)
    }

    /// Apply a partial update to a profile.
    ///
    /// The merged result is re-validated before anything is persisted. If
    /// the updated profile is the active one the client is reconfigured.
    pub async fn update(&self, id: &str, update: ProfileUpdate) -> CoreResult<ApiProfile> {
        let mut profiles = self.ctx.profile_store.load_profiles().await?;
        let Some(index) = profiles.iter().position(|p| p.id == id) else {
            return Err(CoreError::ProfileNotFound(id.to_string()));
        };

        let merged = profiles[index].merged(&update);
        if merged.label.trim().is_empty() {
            return Err(CoreError::ProfileValidation(ProfileValidationError {
                violations: vec![FieldViolation {
                    field: "label".to_string(),
                    reason: "is required".to_string(),
                }],
            }));
        }
        merged.validate()?;

        profiles[index] = merged.clone();
        self.ctx.profile_store.save_profiles(&profiles).await?;

        let active_id = self.ctx.profile_store.load_active_id().await?;
        if active_id.as_deref() == Some(id) {
            self.ctx.configure_client(&merged).await?;
        }
        log::info!("Profile '{}' updated", merged.label);
        Ok(merged)
    }

    /// Delete a profile.
    ///
    /// Deleting the active profile promotes the first remaining one; when
    /// none remain the active pointer and the client are cleared.
    pub async fn delete(&self, id: &str) -> CoreResult<()> {
        let mut profiles = self.ctx.profile_store.load_profiles().await?;
        let Some(index) = profiles.iter().position(|p| p.id == id) else {
            return Err(CoreError::ProfileNotFound(id.to_string()));
        };
        let removed = profiles.remove(index);
        self.ctx.profile_store.save_profiles(&profiles).await?;

        let active_id = self.ctx.profile_store.load_active_id().await?;
        if active_id.as_deref() == Some(id) {
            if let Some(next) = profiles.first() {
                self.ctx.profile_store.save_active_id(Some(&next.id)).await?;
                self.ctx.configure_client(next).await?;
                log::info!(
                    "Active profile '{}' deleted, promoted '{}'",
                    removed.label,
                    next.label
                );
            } else {
                self.ctx.profile_store.save_active_id(None).await?;
                self.ctx.clear_client().await;
                log::info!("Last profile '{}' deleted", removed.label);
            }
        } else {
            log::info!("Profile '{}' deleted", removed.label);
        }
        Ok(())
    }

    /// Switch the active profile.
    ///
    /// The client is built (and the profile validated) before the pointer
    /// is committed, so a failed switch leaves the previous activation
    /// intact.
    pub async fn set_active(&self, id: &str) -> CoreResult<ApiProfile> {
        let profiles = self.ctx.profile_store.load_profiles().await?;
        let Some(profile) = profiles.into_iter().find(|p| p.id == id) else {
            return Err(CoreError::ProfileNotFound(id.to_string()));
        };

        self.ctx.configure_client(&profile).await?;
        self.ctx.profile_store.save_active_id(Some(id)).await?;
        log::info!("Profile '{}' activated", profile.label);
        Ok(profile)
    }

    /// Subscribe to store change notifications. See
    /// [`ProfileStore::subscribe`](crate::traits::ProfileStore::subscribe).
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.ctx.profile_store.subscribe()
    }
}
