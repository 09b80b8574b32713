/// HTTP client for the Customermates REST API
///
/// Every call is a single request against `{base_url}/api/v1{path}` carrying the API key
/// header. Responses are parsed as JSON; non-2xx responses become `CrmError::Api` with the
/// server's error body attached.

use crate::config::CrmConfig;
use crate::crm::error::CrmError;
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;

/// Header carrying the credential
pub const API_KEY_HEADER: &str = "x-api-key";

/// Path used to verify a credential
pub const CREDENTIAL_TEST_PATH: &str = "/users/me";

/// Thin reqwest wrapper bound to one base URL and API key
#[derive(Clone)]
pub struct CrmClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for CrmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrmClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl CrmClient {
    /// Create a client from CRM configuration
    pub fn new(config: &CrmConfig) -> Result<Self, CrmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Full URL for an API path such as `/contacts/search`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> Result<Value, CrmError> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, CrmError> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<Value, CrmError> {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, CrmError> {
        self.request(Method::DELETE, path, None).await
    }

    /// Verify the configured API key by fetching the current user
    pub async fn test_credentials(&self) -> Result<Value, CrmError> {
        self.get(CREDENTIAL_TEST_PATH).await
    }

    /// Issue exactly one request and decode the JSON response
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, CrmError> {
        let url = self.endpoint(path);
        tracing::debug!("🌍 CRM request: {} {}", method, url);

        let mut request_builder = self
            .http
            .request(method.clone(), &url)
            .header(API_KEY_HEADER, &self.api_key)
            .header("Accept", "application/json");

        if let Some(body_data) = body {
            tracing::debug!("📦 Request body: {}", body_data);
            request_builder = request_builder
                .header("Content-Type", "application/json")
                .json(body_data);
        }

        let response = request_builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        tracing::debug!("📡 Response status: {} for {} {}", status, method, url);

        if !status.is_success() {
            let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
            tracing::warn!("❌ CRM request failed: {} {} -> {}", method, url, status);
            return Err(CrmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| CrmError::Decode(e.to_string()))
    }
}
