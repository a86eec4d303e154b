//! Order operations.

use serde_json::Value;

use crate::client::UpmindClient;
use crate::error::{ApiResult, UpmindError};
use crate::types::{unwrap_data, Order, OrderFilters, OrderPayload};

use super::invalid_request;

impl UpmindClient {
    /// Create an order. Requires `client_id` and `product_id`; a present
    /// `quantity` must be a positive integer.
    pub async fn create_order(&self, order: &OrderPayload) -> ApiResult<Order> {
        let mut problems = Vec::new();
        if order.client_id.trim().is_empty() {
            problems.push("client_id is required".to_string());
        }
        if order.product_id.trim().is_empty() {
            problems.push("product_id is required".to_string());
        }
        if order.quantity == Some(0) {
            problems.push("quantity must be a positive integer".to_string());
        }
        if !problems.is_empty() {
            return Err(invalid_request(problems));
        }

        let body = serde_json::to_value(order).map_err(|e| UpmindError::Serialization {
            detail: e.to_string(),
        })?;
        let payload = self.post("/orders", Some(&body)).await?;
        let value = payload.json()?;
        Ok(Order::from_value(unwrap_data(value)))
    }

    /// List orders, with filters passed through as query parameters
    /// (empty values dropped).
    pub async fn list_orders(&self, filters: &OrderFilters) -> ApiResult<Vec<Order>> {
        let query = filters.to_query();
        let query = (!query.is_empty()).then_some(query);
        let payload = self.get("/orders", query.as_deref()).await?;
        let value = payload.json()?;
        Ok(collect_orders(value))
    }
}

fn collect_orders(value: &Value) -> Vec<Order> {
    unwrap_data(value)
        .as_array()
        .map(|items| items.iter().map(Order::from_value).collect())
        .unwrap_or_default()
}
