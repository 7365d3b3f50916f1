//! Application State
//!
//! Holds the configuration, the backend client and the two session
//! controllers. The upload session hands each new report to the chat session.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use aqua_verify_client::{HttpClientOptions, HttpVerifyApi};
use aqua_verify_core::{AnalysisReport, CaseType, VerifyApi};

use crate::models::response::HealthResponse;
use crate::models::settings::{AppConfig, SettingsUpdate};
use crate::services::{ChatSession, SubmitOutcome, UploadSession};
use crate::storage::ConfigService;
use crate::utils::error::AppResult;

/// Application state shared by the command handlers
pub struct AppState {
    /// Configuration service for app settings
    config: Arc<RwLock<ConfigService>>,
    /// Backend root the client was built for
    api_base_url: String,
    api: Arc<dyn VerifyApi>,
    upload: UploadSession,
    chat: ChatSession,
    /// Serializes report hand-off to chat against `reset`
    handoff: Mutex<()>,
}

impl AppState {
    /// Wire the controllers to an existing backend client
    pub fn new(config: ConfigService, api_base_url: impl Into<String>, api: Arc<dyn VerifyApi>) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            api_base_url: api_base_url.into(),
            upload: UploadSession::new(Arc::clone(&api)),
            chat: ChatSession::new(Arc::clone(&api)),
            handoff: Mutex::new(()),
            api,
        }
    }

    /// Build the HTTP client from the loaded configuration.
    ///
    /// `base_url_override` takes precedence over `api_base_url`.
    pub fn from_config(config: ConfigService, base_url_override: Option<&str>) -> AppResult<Self> {
        let settings = config.get_config();
        let base_url = base_url_override.unwrap_or(&settings.api_base_url).to_string();
        let options = HttpClientOptions {
            proxy: settings.proxy.clone(),
            timeout: settings.request_timeout_secs.map(Duration::from_secs),
        };
        let api = HttpVerifyApi::new(&base_url, &options)?;
        info!(base_url = %api.base_url(), "backend client ready");
        Ok(Self::new(config, api.base_url().to_string(), Arc::new(api)))
    }

    pub fn upload(&self) -> &UploadSession {
        &self.upload
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Get the current configuration
    pub async fn get_config(&self) -> AppConfig {
        self.config.read().await.get_config().clone()
    }

    /// Update the configuration.
    ///
    /// The running client keeps its settings; they apply on the next start.
    pub async fn update_config(&self, update: SettingsUpdate) -> AppResult<AppConfig> {
        self.config.write().await.update_config(update)
    }

    /// Check if config is healthy
    pub fn is_config_healthy(&self) -> bool {
        match self.config.try_read() {
            Ok(guard) => guard.is_healthy(),
            Err(_) => false,
        }
    }

    /// Submit the staged files and hand a new report to the chat session.
    pub async fn run_analysis(&self, case_type: Option<CaseType>) -> AppResult<SubmitOutcome> {
        let case_type = match case_type {
            Some(case_type) => case_type,
            None => self.get_config().await.default_case_type,
        };
        let outcome = self.upload.submit(case_type).await?;
        if let SubmitOutcome::Succeeded(report) = &outcome {
            self.hand_off_report(report).await;
        }
        Ok(outcome)
    }

    /// Give chat the report only if it is still the upload session's current one.
    async fn hand_off_report(&self, report: &Arc<AnalysisReport>) {
        let _guard = self.handoff.lock().await;
        let current = self.upload.report().await;
        if current.as_ref().is_some_and(|c| Arc::ptr_eq(c, report)) {
            self.chat.set_report(Some(Arc::clone(report))).await;
        } else {
            debug!("report superseded before hand-off, chat context unchanged");
        }
    }

    /// Start over: clear the upload session and restart the conversation.
    pub async fn reset(&self) {
        let _guard = self.handoff.lock().await;
        self.upload.reset().await;
        self.chat.set_report(None).await;
    }

    pub async fn check_health(&self) -> HealthResponse {
        let backend = self.api.check_health().await;
        HealthResponse::new(self.api_base_url.clone(), backend)
    }
}
