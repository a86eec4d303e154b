//! Normalized resource types and request payloads.
//!
//! The remote platform is loose about shapes: prices arrive as numbers or
//! strings, booleans as booleans or 0/1, collections bare or wrapped in a
//! `data` envelope. Every facade operation funnels responses through the
//! `from_value` constructors here so callers always see one fixed shape
//! with sane defaults for absent fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============ Response envelope helpers ============

/// Unwrap the platform's optional `data` envelope.
///
/// `{"data": [...]}` and a bare `[...]` both normalize to the inner value.
pub(crate) fn unwrap_data(value: &Value) -> &Value {
    value.get("data").unwrap_or(value)
}

/// Extract an `f64` from a JSON number or a numeric string.
pub(crate) fn number_from(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Extract a boolean from a JSON bool or a 0/1 number.
pub(crate) fn bool_from(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|i| i != 0),
        _ => None,
    }
}

/// Extract an owned string, treating non-strings as absent.
pub(crate) fn string_from(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

// ============ Domains ============

/// A single normalized domain-availability result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainSearchResult {
    /// Fully qualified domain name that was checked.
    pub domain: String,
    /// Whether the domain can be registered.
    pub available: bool,
    /// Registration price for one period.
    pub price: f64,
    /// ISO currency code.
    pub currency: String,
    /// Registration period in years.
    pub period: u32,
    /// Whether the registry classifies this as a premium domain.
    pub premium: bool,
}

impl DomainSearchResult {
    /// Normalize one raw search entry. Absent fields take defaults.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            domain: string_from(value.get("domain"))
                .or_else(|| string_from(value.get("name")))
                .unwrap_or_default(),
            available: bool_from(value.get("available")).unwrap_or(false),
            price: number_from(value.get("price")).unwrap_or(0.0),
            currency: string_from(value.get("currency")).unwrap_or_else(|| "USD".to_string()),
            period: number_from(value.get("period")).map_or(1, |p| p as u32),
            premium: bool_from(value.get("premium")).unwrap_or(false),
        }
    }
}

// ============ Products ============

/// A product as exposed by the platform, normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Platform product identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Marketing description.
    pub description: String,
    /// Price per billing cycle.
    pub price: f64,
    /// Billing cycle identifier (e.g. `"monthly"`, `"yearly"`).
    pub billing_cycle: String,
    /// Ordered feature list.
    pub features: Vec<String>,
    /// Whether the product is active/sellable.
    pub is_active: bool,
}

impl Product {
    /// Normalize one raw product entry. Absent fields take defaults.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let features = value
            .get("features")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|f| {
                        // Features arrive as strings or as {"name": "..."} objects.
                        f.as_str()
                            .map(str::to_string)
                            .or_else(|| string_from(f.get("name")))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id: string_from(value.get("id")).unwrap_or_default(),
            name: string_from(value.get("name")).unwrap_or_default(),
            description: string_from(value.get("description")).unwrap_or_default(),
            price: number_from(value.get("price")).unwrap_or(0.0),
            billing_cycle: string_from(value.get("billing_cycle"))
                .or_else(|| string_from(value.get("period")))
                .unwrap_or_else(|| "monthly".to_string()),
            features,
            is_active: bool_from(value.get("is_active"))
                .or_else(|| bool_from(value.get("status")))
                .unwrap_or(true),
        }
    }
}

/// Payload for creating a product. Required fields are enforced by the
/// type; the facade additionally rejects blank names and non-finite
/// prices before any network call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPayload {
    /// Display name. Must be non-empty.
    pub name: String,
    /// Price per billing cycle. Must be finite and non-negative.
    pub price: f64,
    /// Marketing description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Billing cycle identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_cycle: Option<String>,
    /// Ordered feature list.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub features: Vec<String>,
    /// Whether the product should be active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Partial update for a product. Every field optional; `price`, when
/// present, must still be a valid number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    /// New name, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New price, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// New description, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New billing cycle, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_cycle: Option<String>,
    /// New feature list, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    /// New active flag, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

// ============ Clients ============

/// Payload for creating a customer record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientPayload {
    /// Contact email. Must match a basic email pattern.
    pub email: String,
    /// Given name. Must be non-empty.
    pub first_name: String,
    /// Family name. Must be non-empty.
    pub last_name: String,
    /// Optional company name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Optional phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A customer record as exposed by the platform, normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    /// Platform client identifier.
    pub id: String,
    /// Contact email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Company name, if any.
    pub company: Option<String>,
}

impl ClientRecord {
    /// Normalize one raw client entry.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: string_from(value.get("id")).unwrap_or_default(),
            email: string_from(value.get("email")).unwrap_or_default(),
            first_name: string_from(value.get("first_name")).unwrap_or_default(),
            last_name: string_from(value.get("last_name")).unwrap_or_default(),
            company: string_from(value.get("company")),
        }
    }
}

/// Query filters for listing clients. Empty values are dropped from the
/// query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientFilters {
    /// Exact email match.
    pub email: Option<String>,
    /// Free-text search term.
    pub search: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size.
    pub page_size: Option<u32>,
}

impl ClientFilters {
    /// Build query parameters, dropping empty/absent values.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        push_str_param(&mut query, "email", self.email.as_deref());
        push_str_param(&mut query, "search", self.search.as_deref());
        push_num_param(&mut query, "page", self.page);
        push_num_param(&mut query, "page_size", self.page_size);
        query
    }
}

// ============ Orders ============

/// Payload for creating an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPayload {
    /// Purchasing client id. Must be non-empty.
    pub client_id: String,
    /// Ordered product id. Must be non-empty.
    pub product_id: String,
    /// Quantity; when present must be a positive integer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    /// Billing cycle override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_cycle: Option<String>,
}

/// An order as exposed by the platform, normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Platform order identifier.
    pub id: String,
    /// Purchasing client id.
    pub client_id: String,
    /// Ordered product id.
    pub product_id: String,
    /// Order status string as reported by the platform.
    pub status: String,
    /// Order total.
    pub total: f64,
}

impl Order {
    /// Normalize one raw order entry.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: string_from(value.get("id")).unwrap_or_default(),
            client_id: string_from(value.get("client_id")).unwrap_or_default(),
            product_id: string_from(value.get("product_id")).unwrap_or_default(),
            status: string_from(value.get("status")).unwrap_or_else(|| "unknown".to_string()),
            total: number_from(value.get("total")).unwrap_or(0.0),
        }
    }
}

/// Query filters for listing orders. Empty values are dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderFilters {
    /// Restrict to one client.
    pub client_id: Option<String>,
    /// Restrict to a status.
    pub status: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size.
    pub page_size: Option<u32>,
}

impl OrderFilters {
    /// Build query parameters, dropping empty/absent values.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        push_str_param(&mut query, "client_id", self.client_id.as_deref());
        push_str_param(&mut query, "status", self.status.as_deref());
        push_num_param(&mut query, "page", self.page);
        push_num_param(&mut query, "page_size", self.page_size);
        query
    }
}

fn push_str_param(query: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(v) = value {
        if !v.trim().is_empty() {
            query.push((key, v.to_string()));
        }
    }
}

fn push_num_param(query: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<u32>) {
    if let Some(v) = value {
        query.push((key, v.to_string()));
    }
}
