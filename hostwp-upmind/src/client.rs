//! Authenticated HTTP client for the Upmind platform.
//!
//! The client is built from one validated [`ApiProfile`] and passed
//! around explicitly; there is no ambient global configuration. Every
//! request carries the bearer token, JSON content negotiation headers and
//! the brand discriminator; transient failures are retried per the
//! profile's [`RetryPolicy`].

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde_json::Value;

use crate::config::{ApiProfile, ProfileValidationError};
use crate::error::{ApiResult, UpmindError};
use crate::retry::RetryPolicy;
use crate::utils::log_sanitizer::{mask_token, truncate_for_log};

/// Default connect timeout (seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds).
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Create the underlying HTTP client with transport timeouts.
///
/// These are fixed transport limits, not the profile's advisory
/// `timeout_secs`, which is stored but deliberately not enforced.
fn create_http_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client")
}

/// Body of a successful response.
///
/// JSON bodies are parsed; anything else (including a declared-JSON body
/// that fails to parse) degrades to raw text rather than erroring.
#[derive(Debug, Clone)]
pub enum ApiBody {
    /// Parsed JSON body.
    Json(Value),
    /// Raw text body.
    Text(String),
}

/// Status code plus normalized body of a successful call.
#[derive(Debug, Clone)]
pub struct ApiPayload {
    /// HTTP status code.
    pub status: u16,
    /// Normalized body.
    pub body: ApiBody,
}

impl ApiPayload {
    /// Borrow the body as JSON, or fail with [`UpmindError::Parse`] when
    /// the caller needs structure but the platform returned text.
    pub fn json(&self) -> ApiResult<&Value> {
        match &self.body {
            ApiBody::Json(value) => Ok(value),
            ApiBody::Text(text) => Err(UpmindError::Parse {
                detail: format!(
                    "expected a JSON body, got text: {}",
                    truncate_for_log(text)
                ),
            }),
        }
    }
}

/// Upmind API client bound to a single configuration profile.
pub struct UpmindClient {
    http: Client,
    base_url: String,
    token: String,
    brand_id: String,
    retry: RetryPolicy,
}

impl UpmindClient {
    /// Build a client from a profile, validating it first.
    ///
    /// The trailing slash is stripped from the base URL so paths always
    /// join as `base_url + "/path"`. The profile's `retry_attempts`
    /// becomes the attempt budget.
    pub fn from_profile(profile: &ApiProfile) -> Result<Self, ProfileValidationError> {
        profile.validate()?;
        log::debug!(
            "Configuring Upmind client: {} (brand {}, token {})",
            profile.base_url,
            profile.brand_id,
            mask_token(&profile.token)
        );
        Ok(Self {
            http: create_http_client(),
            base_url: profile.base_url.trim_end_matches('/').to_string(),
            token: profile.token.clone(),
            brand_id: profile.brand_id.clone(),
            retry: RetryPolicy::with_attempts(profile.retry_attempts),
        })
    }

    /// Override the retry policy (used by tests to shrink backoff delays).
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Base URL this client targets (trailing slash stripped).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Brand discriminator sent with every request.
    #[must_use]
    pub fn brand_id(&self) -> &str {
        &self.brand_id
    }

    fn builder(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&'static str, String)]>,
        body: Option<&Value>,
    ) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self
            .http
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .header("X-Brand-ID", &self.brand_id);
        if let Some(query) = query {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        builder
    }

    /// Execute a request with bounded retry and linear backoff.
    ///
    /// Transport failures and 5xx responses are retried up to the attempt
    /// budget; 4xx responses return immediately. When the request body
    /// cannot be cloned the call falls back to a single attempt.
    pub(crate) async fn execute(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&'static str, String)]>,
        body: Option<&Value>,
    ) -> ApiResult<ApiPayload> {
        let builder = self.builder(method.clone(), path, query, body);

        let mut last_error = None;
        for attempt in 1..=self.retry.max_attempts {
            let Some(req) = builder.try_clone() else {
                log::warn!("Cannot clone request for {method} {path}, disabling retry");
                return self.send_once(builder, &method, path).await;
            };

            match self.send_once(req, &method, path).await {
                Ok(payload) => return Ok(payload),
                Err(e) if self.retry.allows_retry(attempt) && e.is_retryable() => {
                    let delay = self.retry.delay_after(attempt);
                    log::warn!(
                        "{method} {path} failed (attempt {attempt}/{}), retrying in {:.1}s: {e}",
                        self.retry.max_attempts,
                        delay.as_secs_f32(),
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| UpmindError::Network {
            detail: "All retries exhausted with no error captured".to_string(),
        }))
    }

    /// Send one request and normalize the response.
    async fn send_once(
        &self,
        builder: RequestBuilder,
        method: &Method,
        path: &str,
    ) -> ApiResult<ApiPayload> {
        log::debug!("{method} {}{path}", self.base_url);

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                UpmindError::Timeout {
                    detail: e.to_string(),
                }
            } else {
                UpmindError::Network {
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json"));

        let text = response.text().await.map_err(|e| UpmindError::Network {
            detail: format!("Failed to read response body: {e}"),
        })?;
        log::debug!("Response {status}: {}", truncate_for_log(&text));

        if status.is_success() {
            // Declared-JSON bodies that fail to parse degrade to text.
            let body = if is_json {
                serde_json::from_str(&text).map_or_else(|_| ApiBody::Text(text), ApiBody::Json)
            } else {
                ApiBody::Text(text)
            };
            return Ok(ApiPayload {
                status: status.as_u16(),
                body,
            });
        }

        let message = extract_error_message(&text, status);
        if status.is_client_error() {
            log::warn!("{method} {path} rejected: {} {message}", status.as_u16());
            Err(UpmindError::Api {
                status: status.as_u16(),
                message,
                raw_body: (!text.is_empty()).then_some(text),
            })
        } else {
            log::warn!("{method} {path} server error: {} {message}", status.as_u16());
            Err(UpmindError::Server {
                status: status.as_u16(),
                message,
            })
        }
    }

    // ===== Verb helpers used by the facade modules =====

    pub(crate) async fn get(
        &self,
        path: &str,
        query: Option<&[(&'static str, String)]>,
    ) -> ApiResult<ApiPayload> {
        self.execute(Method::GET, path, query, None).await
    }

    pub(crate) async fn post(&self, path: &str, body: Option<&Value>) -> ApiResult<ApiPayload> {
        self.execute(Method::POST, path, None, body).await
    }

    pub(crate) async fn put(&self, path: &str, body: &Value) -> ApiResult<ApiPayload> {
        self.execute(Method::PUT, path, None, Some(body)).await
    }

    pub(crate) async fn delete(&self, path: &str) -> ApiResult<ApiPayload> {
        self.execute(Method::DELETE, path, None, None).await
    }
}

/// Best-effort extraction of a human-readable error message.
///
/// Prefers a JSON `message` (or `error`) field, then the raw body text,
/// then the canonical status reason.
fn extract_error_message(body: &str, status: StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(msg) = value
            .get("message")
            .or_else(|| value.get("error"))
            .and_then(Value::as_str)
        {
            if !msg.trim().is_empty() {
                return msg.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return truncate_for_log(trimmed);
    }
    status
        .canonical_reason()
        .unwrap_or("Unknown error")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_message_from_json_field() {
        let msg = extract_error_message(
            "{\"message\": \"Invalid token\"}",
            StatusCode::UNAUTHORIZED,
        );
        assert_eq!(msg, "Invalid token");
    }

    #[test]
    fn extract_message_from_error_field() {
        let msg = extract_error_message("{\"error\": \"Forbidden brand\"}", StatusCode::FORBIDDEN);
        assert_eq!(msg, "Forbidden brand");
    }

    #[test]
    fn extract_message_falls_back_to_raw_text() {
        let msg = extract_error_message("gateway exploded", StatusCode::BAD_GATEWAY);
        assert_eq!(msg, "gateway exploded");
    }

    #[test]
    fn extract_message_falls_back_to_status_reason() {
        let msg = extract_error_message("", StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(msg, "Service Unavailable");
    }

    #[test]
    fn payload_json_accessor() {
        let payload = ApiPayload {
            status: 200,
            body: ApiBody::Json(json!({"ok": true})),
        };
        assert!(payload.json().is_ok());

        let text_payload = ApiPayload {
            status: 200,
            body: ApiBody::Text("plain".to_string()),
        };
        assert!(matches!(
            text_payload.json(),
            Err(UpmindError::Parse { .. })
        ));
    }

    #[test]
    fn from_profile_strips_trailing_slash() {
        let profile = crate::config::ApiProfile::from_new(crate::config::NewProfile {
            label: "Test".to_string(),
            base_url: "https://api.upmind.example/".to_string(),
            token: "t".to_string(),
            brand_id: Some("b".to_string()),
            environment: crate::config::Environment::Development,
            timeout_secs: None,
            retry_attempts: None,
        })
        .unwrap();
        let client = UpmindClient::from_profile(&profile).unwrap();
        assert_eq!(client.base_url(), "https://api.upmind.example");
        assert_eq!(client.brand_id(), "b");
    }

    #[test]
    fn from_profile_rejects_invalid() {
        let profile = crate::config::ApiProfile::from_new(crate::config::NewProfile {
            label: "Test".to_string(),
            base_url: "https://api.upmind.example".to_string(),
            token: "t".to_string(),
            brand_id: None,
            environment: crate::config::Environment::Development,
            timeout_secs: None,
            retry_attempts: None,
        })
        .unwrap();
        let broken = crate::config::ApiProfile {
            token: String::new(),
            ..profile
        };
        assert!(UpmindClient::from_profile(&broken).is_err());
    }
}
