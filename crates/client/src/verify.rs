//! Aqua Verify HTTP Client
//!
//! `reqwest` implementation of `VerifyApi` against the backend routes
//! `POST /analyze`, `POST /chat` and `GET /health`.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use aqua_verify_core::api::VerifyApi;
use aqua_verify_core::chat::{ChatMessage, ChatRequest, ChatRole};
use aqua_verify_core::error::{ClientError, ClientResult};
use aqua_verify_core::files::StagedFile;
use aqua_verify_core::report::{AnalysisReport, CaseType};

use crate::http_client::{build_http_client, HttpClientOptions};
use crate::http_error::{
    parse_http_error, transport_error, ANALYZE_FALLBACK_MESSAGE, CHAT_FALLBACK_MESSAGE,
};

/// Default backend location (the dev server proxies `/api` to this port).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// Multipart field name for uploaded files
const FILES_FIELD: &str = "files";

/// HTTP client for the analysis backend
#[derive(Debug, Clone)]
pub struct HttpVerifyApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpVerifyApi {
    /// Create a client for `base_url` (e.g. `http://127.0.0.1:8000/api`).
    pub fn new(base_url: &str, options: &HttpClientOptions) -> ClientResult<Self> {
        let parsed = url::Url::parse(base_url)
            .map_err(|e| ClientError::validation(format!("invalid base URL '{}': {}", base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::validation(format!(
                "base URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }
        let client = build_http_client(options)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for a backend route.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build the multipart body, one `files` part per staged file.
    fn build_form(files: &[StagedFile]) -> ClientResult<Form> {
        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(file.content().to_vec())
                .file_name(file.filename().to_string())
                .mime_str(file.content_type())
                .map_err(|e| ClientError::validation(format!("invalid content type: {}", e)))?;
            form = form.part(FILES_FIELD, part);
        }
        Ok(form)
    }

    /// Read the response and decode it, or map a failure status.
    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
        fallback: &str,
    ) -> ClientResult<T> {
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(parse_http_error(status.as_u16(), &body, fallback));
        }

        serde_json::from_str(&body)
            .map_err(|e| ClientError::parse(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl VerifyApi for HttpVerifyApi {
    async fn submit_analysis(
        &self,
        files: &[StagedFile],
        case_type: CaseType,
    ) -> ClientResult<AnalysisReport> {
        if files.is_empty() {
            return Err(ClientError::validation("at least one file is required"));
        }

        let form = Self::build_form(files)?;
        debug!(
            files = files.len(),
            case_type = %case_type,
            "submitting documents for analysis"
        );

        let response = self
            .client
            .post(self.endpoint("analyze"))
            .query(&[("case_type", case_type.as_str())])
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        Self::read_json(response, ANALYZE_FALLBACK_MESSAGE).await
    }

    async fn send_chat_message(
        &self,
        text: &str,
        report: Option<&AnalysisReport>,
    ) -> ClientResult<ChatMessage> {
        if text.trim().is_empty() {
            return Err(ClientError::validation("message cannot be empty"));
        }

        debug!(has_report = report.is_some(), "sending chat message");

        let response = self
            .client
            .post(self.endpoint("chat"))
            .json(&ChatRequest {
                message: text,
                report,
            })
            .send()
            .await
            .map_err(transport_error)?;

        let message: ChatMessage = Self::read_json(response, CHAT_FALLBACK_MESSAGE).await?;
        if message.role != ChatRole::Assistant {
            warn!(role = %message.role, "chat reply had unexpected role, treating as assistant");
            return Ok(ChatMessage::assistant(message.content));
        }
        Ok(message)
    }

    async fn check_health(&self) -> bool {
        match self.client.get(self.endpoint("health")).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, "health check failed");
                false
            }
        }
    }
}
