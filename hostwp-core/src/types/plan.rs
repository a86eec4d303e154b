//! Local hosting plan model.
//!
//! A plan is the local representation of a sellable hosting product. The
//! shared fields mirror the remote Upmind product; the presentation fields
//! (`slug`, `icon_emoji`, `is_popular`, `sort_order`) exist only locally
//! and must survive every sync untouched.

use chrono::{DateTime, Utc};
use hostwp_upmind::{Product, ProductPayload, ProductUpdate};
use serde::{Deserialize, Serialize};

/// A hosting plan in the local catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostingPlan {
    /// Local identifier, assigned at creation. Immutable.
    pub id: String,
    /// URL-friendly identifier for the storefront. Local-only.
    pub slug: String,
    /// Display name. Mirrored to the remote product.
    pub name: String,
    /// Marketing description. Mirrored to the remote product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price per billing cycle. Mirrored to the remote product.
    pub price: f64,
    /// Billing cycle (`"monthly"`, `"yearly"`, ...). Mirrored.
    pub billing_cycle: String,
    /// Feature bullet list. Mirrored to the remote product.
    #[serde(default)]
    pub features: Vec<String>,
    /// Whether the plan is sellable. Mirrored to the remote product.
    pub is_active: bool,
    /// Emoji shown on the plan card. Local-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_emoji: Option<String>,
    /// Highlights the plan in the storefront. Local-only.
    #[serde(default)]
    pub is_popular: bool,
    /// Display ordering in plan listings. Local-only.
    #[serde(default)]
    pub sort_order: i32,
    /// Id of the linked remote product, once pushed or pulled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upmind_product_id: Option<String>,
    /// Whether this plan participates in bulk sync.
    #[serde(default = "default_sync_enabled")]
    pub sync_enabled: bool,
    /// When the plan last matched the remote product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_synced_at: Option<DateTime<Utc>>,
    /// When the plan was created.
    pub created_at: DateTime<Utc>,
    /// When the plan was last modified.
    pub updated_at: DateTime<Utc>,
}

fn default_sync_enabled() -> bool {
    true
}

impl HostingPlan {
    /// Create a fresh local plan with defaults and a slug derived from
    /// the name.
    #[must_use]
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        let name = name.into();
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            slug: slugify(&name),
            name,
            description: None,
            price,
            billing_cycle: "monthly".to_string(),
            features: Vec::new(),
            is_active: true,
            icon_emoji: None,
            is_popular: false,
            sort_order: 0,
            upmind_product_id: None,
            sync_enabled: true,
            last_synced_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a local plan from a remote product that has no local
    /// counterpart yet. Presentation fields get defaults; the linkage is
    /// recorded immediately.
    #[must_use]
    pub fn from_remote(product: &Product) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            slug: slugify(&product.name),
            name: product.name.clone(),
            description: non_empty(&product.description),
            price: product.price,
            billing_cycle: product.billing_cycle.clone(),
            features: product.features.clone(),
            is_active: product.is_active,
            icon_emoji: None,
            is_popular: false,
            sort_order: 0,
            upmind_product_id: Some(product.id.clone()),
            sync_enabled: true,
            last_synced_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    /// The outbound payload for pushing this plan to the remote catalog.
    /// Only shared fields are included.
    #[must_use]
    pub fn to_product_payload(&self) -> ProductPayload {
        ProductPayload {
            name: self.name.clone(),
            price: self.price,
            description: self.description.clone(),
            billing_cycle: Some(self.billing_cycle.clone()),
            features: self.features.clone(),
            is_active: Some(self.is_active),
        }
    }

    /// The full-overwrite payload for updating the linked remote product.
    /// Sync is last-write-wins, so every shared field is sent.
    #[must_use]
    pub fn to_product_update(&self) -> ProductUpdate {
        ProductUpdate {
            name: Some(self.name.clone()),
            price: Some(self.price),
            description: self.description.clone(),
            billing_cycle: Some(self.billing_cycle.clone()),
            features: Some(self.features.clone()),
            is_active: Some(self.is_active),
        }
    }

    /// Overwrite the shared fields from the remote product and stamp the
    /// sync time. Local-only presentation fields are left untouched.
    pub fn apply_remote(&mut self, product: &Product) {
        self.name = product.name.clone();
        self.description = non_empty(&product.description);
        self.price = product.price;
        self.billing_cycle = product.billing_cycle.clone();
        self.features = product.features.clone();
        self.is_active = product.is_active;
        self.upmind_product_id = Some(product.id.clone());
        let now = Utc::now();
        self.last_synced_at = Some(now);
        self.updated_at = now;
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// Derive a URL-friendly slug from a display name.
///
/// Lowercases, replaces runs of non-alphanumeric characters with a single
/// hyphen, and trims. A name with no usable characters yields `"plan"`.
#[must_use]
pub(crate) fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_dash = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }
    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "plan".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Business Pro"), "business-pro");
        assert_eq!(slugify("  WP Starter (2024)! "), "wp-starter-2024");
        assert_eq!(slugify("---"), "plan");
        assert_eq!(slugify(""), "plan");
    }

    #[test]
    fn new_plan_defaults() {
        let plan = HostingPlan::new("Starter Plan", 4.99);
        assert_eq!(plan.slug, "starter-plan");
        assert_eq!(plan.billing_cycle, "monthly");
        assert!(plan.is_active);
        assert!(plan.sync_enabled);
        assert!(plan.upmind_product_id.is_none());
        assert!(plan.last_synced_at.is_none());
    }

    #[test]
    fn from_remote_records_linkage_and_defaults_presentation() {
        let product = Product {
            id: "prod-1".to_string(),
            name: "Cloud VPS".to_string(),
            description: "Fast".to_string(),
            price: 19.0,
            billing_cycle: "yearly".to_string(),
            features: vec!["NVMe".to_string()],
            is_active: true,
        };
        let plan = HostingPlan::from_remote(&product);
        assert_eq!(plan.slug, "cloud-vps");
        assert_eq!(plan.upmind_product_id.as_deref(), Some("prod-1"));
        assert_eq!(plan.icon_emoji, None);
        assert!(!plan.is_popular);
        assert!(plan.last_synced_at.is_some());
    }

    #[test]
    fn apply_remote_preserves_local_fields() {
        let mut plan = HostingPlan::new("Starter", 4.99);
        plan.icon_emoji = Some("🚀".to_string());
        plan.is_popular = true;
        plan.sort_order = 7;
        let slug = plan.slug.clone();

        let product = Product {
            id: "prod-2".to_string(),
            name: "Starter v2".to_string(),
            description: String::new(),
            price: 5.99,
            billing_cycle: "monthly".to_string(),
            features: vec!["SSL".to_string()],
            is_active: false,
        };
        plan.apply_remote(&product);

        assert_eq!(plan.name, "Starter v2");
        assert!((plan.price - 5.99).abs() < f64::EPSILON);
        assert!(!plan.is_active);
        assert_eq!(plan.upmind_product_id.as_deref(), Some("prod-2"));
        // Presentation fields survive untouched.
        assert_eq!(plan.icon_emoji.as_deref(), Some("🚀"));
        assert!(plan.is_popular);
        assert_eq!(plan.sort_order, 7);
        assert_eq!(plan.slug, slug);
    }

    #[test]
    fn to_product_payload_excludes_local_fields() {
        let mut plan = HostingPlan::new("Pro", 29.0);
        plan.is_popular = true;
        let payload = plan.to_product_payload();
        assert_eq!(payload.name, "Pro");
        assert_eq!(payload.billing_cycle.as_deref(), Some("monthly"));
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("isPopular").is_none());
        assert!(json.get("slug").is_none());
    }

    #[test]
    fn serde_camel_case_round_trip() {
        let plan = HostingPlan::new("Starter", 4.99);
        let json = serde_json::to_string(&plan).unwrap();
        assert!(json.contains("\"billingCycle\""));
        assert!(json.contains("\"sortOrder\""));
        let back: HostingPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, plan.id);
        assert_eq!(back.slug, plan.slug);
    }
}
