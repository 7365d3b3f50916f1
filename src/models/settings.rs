//! Settings Models
//!
//! Application configuration stored in `~/.aqua-verify/config.json`.

use serde::{Deserialize, Deserializer, Serialize};

use aqua_verify_client::DEFAULT_BASE_URL;
use aqua_verify_core::{CaseType, ProxyConfig};

/// Accepted values for `log_level`
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend API root, e.g. `http://127.0.0.1:8000/api`
    #[serde(default = "default_base_url")]
    pub api_base_url: String,
    /// Whole-request timeout in seconds; `None` waits indefinitely
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: Option<u64>,
    /// Case type preselected for new analyses
    #[serde(default)]
    pub default_case_type: CaseType,
    /// Optional proxy for backend calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyConfig>,
    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> Option<u64> {
    Some(120)
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_base_url(),
            request_timeout_secs: default_timeout(),
            default_case_type: CaseType::PC,
            proxy: None,
            log_level: default_log_level(),
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub api_base_url: Option<String>,
    /// `Some(None)` (JSON `null`) clears the timeout
    #[serde(default, deserialize_with = "explicit_null")]
    pub request_timeout_secs: Option<Option<u64>>,
    pub default_case_type: Option<CaseType>,
    /// `Some(None)` (JSON `null`) removes the proxy
    #[serde(default, deserialize_with = "explicit_null")]
    pub proxy: Option<Option<ProxyConfig>>,
    pub log_level: Option<String>,
}

/// Keep a present-but-null field distinct from an absent one.
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(url) = update.api_base_url {
            self.api_base_url = url;
        }
        if let Some(timeout) = update.request_timeout_secs {
            self.request_timeout_secs = timeout;
        }
        if let Some(case_type) = update.default_case_type {
            self.default_case_type = case_type;
        }
        if let Some(proxy) = update.proxy {
            self.proxy = proxy;
        }
        if let Some(level) = update.log_level {
            self.log_level = level;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let url = url::Url::parse(&self.api_base_url)
            .map_err(|e| format!("Invalid api_base_url '{}': {}", self.api_base_url, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "Invalid api_base_url scheme: {}. Must be 'http' or 'https'",
                url.scheme()
            ));
        }

        if self.request_timeout_secs == Some(0) {
            return Err("request_timeout_secs must be at least 1 second".to_string());
        }

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(format!(
                "Invalid log_level: {}. Must be one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            ));
        }

        if let Some(proxy) = &self.proxy {
            if proxy.host.trim().is_empty() {
                return Err("proxy.host cannot be empty".to_string());
            }
        }

        Ok(())
    }
}
