//! HTTP Client Factory
//!
//! Builds the `reqwest` client used for every backend call, applying the
//! configured proxy and request timeout.

use std::time::Duration;

use aqua_verify_core::error::{ClientError, ClientResult};
use aqua_verify_core::proxy::ProxyConfig;

/// Options applied when building the HTTP client.
#[derive(Debug, Clone, Default)]
pub struct HttpClientOptions {
    /// `None` disables proxies entirely, ignoring `HTTP_PROXY` and friends.
    pub proxy: Option<ProxyConfig>,
    /// Whole-request timeout. `None` waits for the transport to resolve.
    pub timeout: Option<Duration>,
}

/// Build a `reqwest::Client` from the given options.
pub fn build_http_client(options: &HttpClientOptions) -> ClientResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    match &options.proxy {
        Some(cfg) => {
            let mut proxy = reqwest::Proxy::all(cfg.url())
                .map_err(|e| ClientError::validation(format!("invalid proxy URL: {}", e)))?;
            if let Some((user, password)) = cfg.credentials() {
                proxy = proxy.basic_auth(user, password);
            }
            builder = builder.proxy(proxy);
        }
        None => {
            builder = builder.no_proxy();
        }
    }
    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| ClientError::network(format!("failed to build HTTP client: {}", e)))
}
