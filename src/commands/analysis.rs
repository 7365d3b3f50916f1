//! Analysis Commands
//!
//! Staging files, submitting them for analysis, and reading the result.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use aqua_verify_core::{AnalysisReport, CaseType, StagedFile};

use crate::models::response::CommandResponse;
use crate::services::report_view::{derive_view, ReportView};
use crate::services::{SubmitOutcome, UploadSnapshot};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};

/// Result of staging files from disk
#[derive(Debug, Clone, Serialize)]
pub struct StageResult {
    /// Names skipped because of an unsupported extension
    pub rejected: Vec<String>,
    pub session: UploadSnapshot,
}

async fn read_staged_file(path: &Path) -> AppResult<StagedFile> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AppError::validation(format!("Not a file path: {}", path.display())))?;
    let content = tokio::fs::read(path).await?;
    debug!(path = %path.display(), bytes = content.len(), "read file for staging");
    Ok(StagedFile::new(filename, content))
}

/// Read files from disk and stage them
pub async fn stage_files(state: &AppState, paths: &[PathBuf]) -> CommandResponse<StageResult> {
    async fn inner(state: &AppState, paths: &[PathBuf]) -> AppResult<StageResult> {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            files.push(read_staged_file(path).await?);
        }
        let rejected = state.upload().add_files(files).await?;
        Ok(StageResult {
            rejected,
            session: state.upload().snapshot().await,
        })
    }
    inner(state, paths).await.into()
}

/// Remove a staged file by position; returns its name when one was removed
pub async fn remove_staged_file(state: &AppState, index: usize) -> CommandResponse<Option<String>> {
    match state.upload().remove_file(index).await {
        Ok(removed) => CommandResponse::ok(removed.map(|f| f.filename().to_string())),
        Err(e) => CommandResponse::err(e.to_string()),
    }
}

/// Remove every staged file
pub async fn clear_staged_files(state: &AppState) -> CommandResponse<UploadSnapshot> {
    match state.upload().clear_staged().await {
        Ok(()) => CommandResponse::ok(state.upload().snapshot().await),
        Err(e) => CommandResponse::err(e.to_string()),
    }
}

/// Submit the staged files and return the derived report view.
///
/// A backend failure is returned as the error message shown in the banner.
pub async fn analyze(state: &AppState, case_type: Option<CaseType>) -> CommandResponse<ReportView> {
    match state.run_analysis(case_type).await {
        Ok(SubmitOutcome::Succeeded(report)) => CommandResponse::ok(derive_view(&report)),
        Ok(SubmitOutcome::Failed(message)) => CommandResponse::err(message),
        Ok(SubmitOutcome::Discarded) => CommandResponse::err("Analysis discarded after reset"),
        Err(e) => CommandResponse::err(e.to_string()),
    }
}

/// Get the upload session status
pub async fn get_upload_status(state: &AppState) -> CommandResponse<UploadSnapshot> {
    CommandResponse::ok(state.upload().snapshot().await)
}

/// Get the raw report of the last successful analysis
pub async fn get_report(state: &AppState) -> CommandResponse<Option<AnalysisReport>> {
    CommandResponse::ok(state.upload().report().await.map(|r| (*r).clone()))
}

/// Get the display view of the last successful analysis
pub async fn get_report_view(state: &AppState) -> CommandResponse<Option<ReportView>> {
    CommandResponse::ok(state.upload().report().await.map(|r| derive_view(&r)))
}

/// Hide the error banner, keeping staged files
pub async fn dismiss_error(state: &AppState) -> CommandResponse<UploadSnapshot> {
    state.upload().dismiss_error().await;
    CommandResponse::ok(state.upload().snapshot().await)
}

/// Start a new analysis: clears files, report, error and the conversation
pub async fn reset_session(state: &AppState) -> CommandResponse<UploadSnapshot> {
    state.reset().await;
    CommandResponse::ok(state.upload().snapshot().await)
}
