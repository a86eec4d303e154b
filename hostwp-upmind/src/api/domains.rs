//! Domain search and renewal operations.

use serde_json::{json, Value};

use crate::client::{ApiBody, UpmindClient};
use crate::error::ApiResult;
use crate::types::{unwrap_data, DomainSearchResult};

use super::invalid_request;

impl UpmindClient {
    /// Check availability and pricing for a domain name.
    ///
    /// Rejects an empty name locally; otherwise `POST /domains/search`
    /// and normalize each entry to a [`DomainSearchResult`].
    pub async fn search_domain(&self, name: &str) -> ApiResult<Vec<DomainSearchResult>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid_request(vec!["domain name is required".to_string()]));
        }

        let body = json!({ "domain": name });
        let payload = self.post("/domains/search", Some(&body)).await?;
        let value = payload.json()?;

        let results = unwrap_data(value)
            .as_array()
            .map(|items| items.iter().map(DomainSearchResult::from_value).collect())
            .unwrap_or_default();
        Ok(results)
    }

    /// Renew a registered domain by its platform id.
    ///
    /// Returns the raw renewal receipt; the platform's shape here varies
    /// by registry, so no stronger typing is imposed.
    pub async fn renew_domain(&self, domain_id: &str) -> ApiResult<Value> {
        let domain_id = domain_id.trim();
        if domain_id.is_empty() {
            return Err(invalid_request(vec!["domain id is required".to_string()]));
        }

        let payload = self
            .post(&format!("/domains/{domain_id}/renew"), None)
            .await?;
        Ok(match payload.body {
            ApiBody::Json(value) => unwrap_data(&value).clone(),
            ApiBody::Text(text) => Value::String(text),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ApiProfile, NewProfile};
    use crate::error::UpmindError;
    use crate::UpmindClient;

    fn offline_client() -> UpmindClient {
        let profile = ApiProfile::from_new(NewProfile {
            label: "Test".to_string(),
            // Nothing listens here; validation must fail before any dial.
            base_url: "http://127.0.0.1:9".to_string(),
            token: "t".to_string(),
            brand_id: Some("b".to_string()),
            environment: crate::config::Environment::Development,
            timeout_secs: None,
            retry_attempts: Some(1),
        })
        .unwrap();
        UpmindClient::from_profile(&profile).unwrap()
    }

    #[tokio::test]
    async fn search_rejects_empty_name_without_network() {
        let client = offline_client();
        let result = client.search_domain("   ").await;
        assert!(matches!(result, Err(UpmindError::InvalidRequest { .. })));
    }

    #[tokio::test]
    async fn renew_rejects_empty_id_without_network() {
        let client = offline_client();
        let result = client.renew_domain("").await;
        assert!(matches!(result, Err(UpmindError::InvalidRequest { .. })));
    }
}
