//! API credential profiles and their validation.
//!
//! A profile is a named set of Upmind connection settings. The back-office
//! stores any number of them and marks one as active; the active profile
//! configures every outbound call. Validation reports *all* violations at
//! once so the UI can display a complete list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// Deployment environment a profile points at. Informational only; it does
/// not change client behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Live platform.
    #[default]
    Production,
    /// Staging/sandbox platform.
    Staging,
    /// Local or development platform.
    Development,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Staging => write!(f, "staging"),
            Self::Development => write!(f, "development"),
        }
    }
}

/// Brand header value used when a profile omits one.
pub const DEFAULT_BRAND_ID: &str = "default";

/// Default number of request attempts (first try + retries).
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// Default advisory timeout stored on new profiles, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A named Upmind API configuration profile.
///
/// # Serialization
///
/// Serialized in `camelCase` to match the persisted storage format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiProfile {
    /// Opaque unique identifier, assigned at creation time. Immutable.
    pub id: String,
    /// Human-readable name shown in the profile picker.
    pub label: String,
    /// Absolute URL of the Upmind API root.
    pub base_url: String,
    /// Bearer credential. Treated as secret; never logged in full.
    pub token: String,
    /// Tenant/brand discriminator, sent as the `X-Brand-ID` header.
    pub brand_id: String,
    /// Which environment this profile points at.
    #[serde(default)]
    pub environment: Environment,
    /// Advisory request timeout in seconds. Stored but not enforced
    /// against network calls; the client carries fixed transport
    /// timeouts instead.
    pub timeout_secs: u64,
    /// Total request attempts for transient failures (first try included).
    pub retry_attempts: u32,
    /// When the profile was created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last modified.
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a profile. Required connection fields are
/// enforced by the type; `brand_id` defaults to [`DEFAULT_BRAND_ID`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfile {
    /// Human-readable name. Required by the service layer.
    pub label: String,
    /// Absolute URL of the API root.
    pub base_url: String,
    /// Bearer credential.
    pub token: String,
    /// Brand discriminator; defaults to `"default"` when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<String>,
    /// Environment; defaults to production.
    #[serde(default)]
    pub environment: Environment,
    /// Advisory timeout; defaults to [`DEFAULT_TIMEOUT_SECS`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Attempt budget; defaults to [`DEFAULT_RETRY_ATTEMPTS`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_attempts: Option<u32>,
}

/// Partial update for an existing profile. `None` fields are left
/// untouched; the merged result is re-validated before committing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// New label, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// New base URL, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// New token, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// New brand id, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<String>,
    /// New environment, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
    /// New advisory timeout, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// New attempt budget, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_attempts: Option<u32>,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldViolation {
    /// Machine-readable field key (e.g. `"baseUrl"`).
    pub field: String,
    /// Human-readable description of what's wrong.
    pub reason: String,
}

/// Validation error for a profile, carrying every violation at once.
///
/// Callers display the full list rather than fixing fields one at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileValidationError {
    /// All field violations found.
    pub violations: Vec<FieldViolation>,
}

impl std::fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .violations
            .iter()
            .map(|v| format!("{}: {}", v.field, v.reason))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "Invalid API configuration: {joined}")
    }
}

impl std::error::Error for ProfileValidationError {}

impl ApiProfile {
    /// Build a full profile from a creation payload.
    ///
    /// Assigns a fresh id and timestamps, fills defaults, and validates
    /// the result.
    pub fn from_new(new: NewProfile) -> Result<Self, ProfileValidationError> {
        let now = Utc::now();
        let profile = Self {
            id: uuid::Uuid::new_v4().to_string(),
            label: new.label,
            base_url: new.base_url,
            token: new.token,
            brand_id: new
                .brand_id
                .filter(|b| !b.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BRAND_ID.to_string()),
            environment: new.environment,
            timeout_secs: new.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            retry_attempts: new.retry_attempts.unwrap_or(DEFAULT_RETRY_ATTEMPTS),
            created_at: now,
            updated_at: now,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Merge a partial update into this profile, refreshing `updated_at`.
    ///
    /// The caller is responsible for re-validating the merged result
    /// before persisting it.
    #[must_use]
    pub fn merged(&self, update: &ProfileUpdate) -> Self {
        let mut merged = self.clone();
        if let Some(label) = &update.label {
            merged.label = label.clone();
        }
        if let Some(base_url) = &update.base_url {
            merged.base_url = base_url.clone();
        }
        if let Some(token) = &update.token {
            merged.token = token.clone();
        }
        if let Some(brand_id) = &update.brand_id {
            merged.brand_id = brand_id.clone();
        }
        if let Some(environment) = update.environment {
            merged.environment = environment;
        }
        if let Some(timeout_secs) = update.timeout_secs {
            merged.timeout_secs = timeout_secs;
        }
        if let Some(retry_attempts) = update.retry_attempts {
            merged.retry_attempts = retry_attempts;
        }
        merged.updated_at = Utc::now();
        merged
    }

    /// Validate the connection fields required before any request.
    ///
    /// Checks `base_url` (absolute, well-formed URL), `token` and
    /// `brand_id` (non-empty). Reports every violation, not just the
    /// first. `label` is a UI concern and is checked by the service
    /// layer, not here.
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        let mut violations = Vec::new();

        if self.base_url.trim().is_empty() {
            violations.push(FieldViolation {
                field: "baseUrl".to_string(),
                reason: "is required".to_string(),
            });
        } else {
            match Url::parse(&self.base_url) {
                Ok(url) if url.has_host() => {}
                Ok(_) => violations.push(FieldViolation {
                    field: "baseUrl".to_string(),
                    reason: "must be an absolute URL with a host".to_string(),
                }),
                Err(_) => violations.push(FieldViolation {
                    field: "baseUrl".to_string(),
                    reason: "must be a valid absolute URL".to_string(),
                }),
            }
        }

        if self.token.trim().is_empty() {
            violations.push(FieldViolation {
                field: "token".to_string(),
                reason: "is required".to_string(),
            });
        }

        if self.brand_id.trim().is_empty() {
            violations.push(FieldViolation {
                field: "brandId".to_string(),
                reason: "is required".to_string(),
            });
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ProfileValidationError { violations })
        }
    }
}
