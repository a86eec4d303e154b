//! Product catalog CRUD operations.

use serde_json::Value;

use crate::client::UpmindClient;
use crate::error::{ApiResult, UpmindError};
use crate::types::{unwrap_data, Product, ProductPayload, ProductUpdate};

use super::invalid_request;

impl UpmindClient {
    /// Fetch the full product catalog, normalized.
    pub async fn list_products(&self) -> ApiResult<Vec<Product>> {
        let payload = self.get("/products", None).await?;
        let value = payload.json()?;
        Ok(collect_products(value))
    }

    /// Create a product. Requires a non-empty name and a finite,
    /// non-negative price; both problems are reported together.
    pub async fn create_product(&self, product: &ProductPayload) -> ApiResult<Product> {
        let mut problems = Vec::new();
        if product.name.trim().is_empty() {
            problems.push("name is required".to_string());
        }
        if !product.price.is_finite() || product.price < 0.0 {
            problems.push("price must be a valid non-negative number".to_string());
        }
        if !problems.is_empty() {
            return Err(invalid_request(problems));
        }

        let body = to_body(product)?;
        let payload = self.post("/products", Some(&body)).await?;
        let value = payload.json()?;
        Ok(Product::from_value(unwrap_data(value)))
    }

    /// Partially update a product. No fields are required, but a present
    /// price must still be a valid number.
    pub async fn update_product(&self, product_id: &str, update: &ProductUpdate) -> ApiResult<Product> {
        let product_id = product_id.trim();
        let mut problems = Vec::new();
        if product_id.is_empty() {
            problems.push("product id is required".to_string());
        }
        if let Some(price) = update.price {
            if !price.is_finite() || price < 0.0 {
                problems.push("price must be a valid non-negative number".to_string());
            }
        }
        if !problems.is_empty() {
            return Err(invalid_request(problems));
        }

        let body = to_body(update)?;
        let payload = self.put(&format!("/products/{product_id}"), &body).await?;
        let value = payload.json()?;
        Ok(Product::from_value(unwrap_data(value)))
    }

    /// Delete a product by its platform id.
    pub async fn delete_product(&self, product_id: &str) -> ApiResult<()> {
        let product_id = product_id.trim();
        if product_id.is_empty() {
            return Err(invalid_request(vec!["product id is required".to_string()]));
        }
        self.delete(&format!("/products/{product_id}")).await?;
        Ok(())
    }

    /// Cheap authenticated probe so a profile can be tested before saving.
    ///
    /// Returns `Ok(false)` when the platform rejects the credentials
    /// (401/403) and propagates every other failure.
    pub async fn validate_credentials(&self) -> ApiResult<bool> {
        let query = [("page", "1".to_string()), ("page_size", "1".to_string())];
        match self.get("/products", Some(&query)).await {
            Ok(_) => Ok(true),
            Err(UpmindError::Api { status, .. }) if status == 401 || status == 403 => Ok(false),
            Err(e) => Err(e),
        }
    }
}

fn collect_products(value: &Value) -> Vec<Product> {
    unwrap_data(value)
        .as_array()
        .map(|items| items.iter().map(Product::from_value).collect())
        .unwrap_or_default()
}

fn to_body<T: serde::Serialize>(payload: &T) -> ApiResult<Value> {
    serde_json::to_value(payload).map_err(|e| UpmindError::Serialization {
        detail: e.to_string(),
    })
}
