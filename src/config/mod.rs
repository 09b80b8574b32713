/// Configuration management for the Customermates nodes
///
/// Handles server configuration and the CRM connection (base URL and API key credential).

use serde::{Deserialize, Serialize};

/// Default public endpoint of the Customermates API
pub const DEFAULT_BASE_URL: &str = "https://customermates.com";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// CRM connection configuration
    pub crm: CrmConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Server port number
    pub port: u16,
}

/// Connection settings for the Customermates REST API
#[derive(Clone, Serialize, Deserialize)]
pub struct CrmConfig {
    /// Base URL without the `/api/v1` suffix (default: "https://customermates.com")
    pub base_url: String,
    /// API key sent as `x-api-key` on every request; never written out
    #[serde(skip_serializing, default)]
    pub api_key: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

// Keep the API key out of debug output and logs
impl std::fmt::Debug for CrmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrmConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl CrmConfig {
    /// Build a CRM configuration for an explicit endpoint and key
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_secs: 30,
        }
    }
}

impl Default for Config {
    /// Default configuration with ENV_VAR support for k8s/container deployment
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: std::env::var("CUSTOMERMATES_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("CUSTOMERMATES_PORT")
                    .unwrap_or_else(|_| "3004".to_string())
                    .parse()
                    .unwrap_or(3004),
            },
            crm: CrmConfig {
                base_url: std::env::var("CUSTOMERMATES_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
                api_key: std::env::var("CUSTOMERMATES_API_KEY").unwrap_or_default(),
                timeout_secs: std::env::var("CUSTOMERMATES_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            },
        }
    }
}
