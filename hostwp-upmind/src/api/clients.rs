//! Customer (client) operations.

use serde_json::Value;

use crate::client::UpmindClient;
use crate::error::{ApiResult, UpmindError};
use crate::types::{unwrap_data, ClientFilters, ClientPayload, ClientRecord};

use super::{invalid_request, is_plausible_email};

impl UpmindClient {
    /// Create a customer record. Requires a plausible email plus first
    /// and last name; all problems are reported together.
    pub async fn create_client(&self, client: &ClientPayload) -> ApiResult<ClientRecord> {
        let mut problems = Vec::new();
        if client.email.trim().is_empty() {
            problems.push("email is required".to_string());
        } else if !is_plausible_email(client.email.trim()) {
            problems.push("email is not a valid address".to_string());
        }
        if client.first_name.trim().is_empty() {
            problems.push("first_name is required".to_string());
        }
        if client.last_name.trim().is_empty() {
            problems.push("last_name is required".to_string());
        }
        if !problems.is_empty() {
            return Err(invalid_request(problems));
        }

        let body = serde_json::to_value(client).map_err(|e| UpmindError::Serialization {
            detail: e.to_string(),
        })?;
        let payload = self.post("/clients", Some(&body)).await?;
        let value = payload.json()?;
        Ok(ClientRecord::from_value(unwrap_data(value)))
    }

    /// List customers, with filters passed through as query parameters
    /// (empty values dropped).
    pub async fn list_clients(&self, filters: &ClientFilters) -> ApiResult<Vec<ClientRecord>> {
        let query = filters.to_query();
        let query = (!query.is_empty()).then_some(query);
        let payload = self.get("/clients", query.as_deref()).await?;
        let value = payload.json()?;
        Ok(collect_clients(value))
    }
}

fn collect_clients(value: &Value) -> Vec<ClientRecord> {
    unwrap_data(value)
        .as_array()
        .map(|items| items.iter().map(ClientRecord::from_value).collect())
        .unwrap_or_default()
}
