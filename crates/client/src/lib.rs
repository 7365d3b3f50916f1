//! Aqua Verify Client
//!
//! HTTP implementation of the `VerifyApi` contract:
//! - `verify` - the `reqwest` client for `/analyze`, `/chat` and `/health`
//! - `http_client` - client factory with proxy and timeout support
//! - `http_error` - mapping of transport failures and error bodies

pub mod http_client;
pub mod http_error;
pub mod verify;

pub use http_client::{build_http_client, HttpClientOptions};
pub use http_error::{extract_detail, parse_http_error};
pub use verify::{HttpVerifyApi, DEFAULT_BASE_URL};
