//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error types
pub use hostwp_upmind::{ProfileValidationError, UpmindError};

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Profile not found
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    /// Hosting plan not found
    #[error("Hosting plan not found: {0}")]
    PlanNotFound(String),

    /// Remote product not found
    #[error("Upmind product not found: {0}")]
    ProductNotFound(String),

    /// No active API configuration to operate with
    #[error("No API configuration found. Add an Upmind profile and activate it first.")]
    NoActiveProfile,

    /// Profile validation errors (structured, field-level)
    #[error("{0}")]
    ProfileValidation(ProfileValidationError),

    /// Plan has no remote linkage, so a remote-dependent operation cannot run
    #[error("Plan is not synced: {0}")]
    NotSynced(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Upmind API error (converted from the client library)
    #[error("{0}")]
    Upmind(#[from] UpmindError),
}

impl From<ProfileValidationError> for CoreError {
    fn from(err: ProfileValidationError) -> Self {
        Self::ProfileValidation(err)
    }
}

impl CoreError {
    /// Whether this is expected behavior (bad user input, resource does not
    /// exist) rather than an infrastructure fault, for log classification.
    ///
    /// `true` should log at `warn`, `false` at `error`.
    /// **Update this method when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ProfileNotFound(_)
            | Self::PlanNotFound(_)
            | Self::ProductNotFound(_)
            | Self::NoActiveProfile
            | Self::ProfileValidation(_)
            | Self::NotSynced(_)
            | Self::ValidationError(_) => true,
            Self::Upmind(e) => e.is_expected(),
            _ => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
