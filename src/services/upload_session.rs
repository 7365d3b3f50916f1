//! Upload Session Controller
//!
//! Owns the client-side lifecycle of one analysis attempt: staging files,
//! submitting them, tracking the in-flight and error state, and resetting.
//!
//! ## State machine
//!
//! ```text
//! Idle ──add──▶ FilesStaged ──submit──▶ Submitting ──ok──▶ Succeeded
//!                    ▲                       │
//!                    └──────── retry ────── Failed ◀──err──┘
//! ```
//!
//! `reset()` returns to `Idle` from any state. A submission whose reset
//! happened while it was in flight is discarded when it completes.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use aqua_verify_core::{AnalysisReport, CaseType, ClientError, ClientResult, StagedFile, VerifyApi};

/// Lifecycle status of an upload session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    /// No staged files and no report
    Idle,
    /// Files are staged and ready to submit
    FilesStaged,
    /// A submission is in flight
    Submitting,
    /// The last submission produced a report
    Succeeded,
    /// The last submission failed; files stay staged for a retry
    Failed,
}

impl UploadStatus {
    pub fn is_submitting(&self) -> bool {
        matches!(self, UploadStatus::Submitting)
    }
}

impl std::fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadStatus::Idle => write!(f, "idle"),
            UploadStatus::FilesStaged => write!(f, "files_staged"),
            UploadStatus::Submitting => write!(f, "submitting"),
            UploadStatus::Succeeded => write!(f, "succeeded"),
            UploadStatus::Failed => write!(f, "failed"),
        }
    }
}

/// What a completed `submit` did
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The report is now the session's current report
    Succeeded(Arc<AnalysisReport>),
    /// The error message now shown in the banner
    Failed(String),
    /// The session was reset while the request was in flight
    Discarded,
}

/// One staged file as listed to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagedFileSummary {
    pub index: usize,
    pub filename: String,
    pub size_kb: u64,
}

/// Serializable view of the session for command responses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadSnapshot {
    pub session_id: String,
    pub status: UploadStatus,
    pub files: Vec<StagedFileSummary>,
    pub error: Option<String>,
    pub has_report: bool,
}

#[derive(Debug)]
struct UploadState {
    status: UploadStatus,
    files: Vec<StagedFile>,
    report: Option<Arc<AnalysisReport>>,
    error: Option<String>,
    /// Bumped by `reset` so late responses can be recognized
    generation: u64,
}

impl UploadState {
    fn new() -> Self {
        Self {
            status: UploadStatus::Idle,
            files: Vec::new(),
            report: None,
            error: None,
            generation: 0,
        }
    }

    /// Recompute the resting status after the staged set changed.
    /// A failed session keeps its banner until submit, dismiss or reset.
    fn settle(&mut self) {
        if matches!(self.status, UploadStatus::Submitting | UploadStatus::Failed) {
            return;
        }
        self.status = if !self.files.is_empty() {
            UploadStatus::FilesStaged
        } else if self.report.is_some() {
            UploadStatus::Succeeded
        } else {
            UploadStatus::Idle
        };
    }

    fn ensure_not_submitting(&self, action: &str) -> ClientResult<()> {
        if self.status.is_submitting() {
            return Err(ClientError::validation(format!(
                "cannot {} while an analysis is in progress",
                action
            )));
        }
        Ok(())
    }
}

/// Controller for one analysis attempt. Clones share the same session.
#[derive(Clone)]
pub struct UploadSession {
    id: String,
    api: Arc<dyn VerifyApi>,
    state: Arc<RwLock<UploadState>>,
}

impl UploadSession {
    pub fn new(api: Arc<dyn VerifyApi>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            api,
            state: Arc::new(RwLock::new(UploadState::new())),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Stage files for the next submission.
    ///
    /// Files with an extension other than pdf, docx or doc are skipped; their
    /// names are returned. Same-named files are kept as distinct entries.
    pub async fn add_files(
        &self,
        files: impl IntoIterator<Item = StagedFile>,
    ) -> ClientResult<Vec<String>> {
        let mut state = self.state.write().await;
        state.ensure_not_submitting("add files")?;

        let mut rejected = Vec::new();
        for file in files {
            if file.is_supported() {
                state.files.push(file);
            } else {
                warn!(session = %self.id, filename = file.filename(), "skipping unsupported file type");
                rejected.push(file.filename().to_string());
            }
        }
        state.settle();
        debug!(session = %self.id, staged = state.files.len(), "files staged");
        Ok(rejected)
    }

    /// Remove the staged file at `index`.
    ///
    /// An out-of-range index is a no-op and yields `Ok(None)`.
    pub async fn remove_file(&self, index: usize) -> ClientResult<Option<StagedFile>> {
        let mut state = self.state.write().await;
        state.ensure_not_submitting("remove files")?;

        if index >= state.files.len() {
            debug!(session = %self.id, index, "remove_file index out of range, ignoring");
            return Ok(None);
        }
        let removed = state.files.remove(index);
        state.settle();
        Ok(Some(removed))
    }

    /// Drop every staged file.
    pub async fn clear_staged(&self) -> ClientResult<()> {
        let mut state = self.state.write().await;
        state.ensure_not_submitting("clear files")?;
        state.files.clear();
        state.settle();
        Ok(())
    }

    /// Submit the staged files.
    ///
    /// Returns `Err` only for precondition violations (nothing staged, or a
    /// submission already in flight); in both cases no request is made.
    /// Backend failures are captured into the `Failed` state and reported
    /// as `SubmitOutcome::Failed`.
    pub async fn submit(&self, case_type: CaseType) -> ClientResult<SubmitOutcome> {
        let (files, generation) = {
            let mut state = self.state.write().await;
            if state.status.is_submitting() {
                return Err(ClientError::validation("an analysis is already in progress"));
            }
            if state.files.is_empty() {
                return Err(ClientError::validation("no files staged for analysis"));
            }
            state.status = UploadStatus::Submitting;
            state.error = None;
            (state.files.clone(), state.generation)
        };

        info!(
            session = %self.id,
            files = files.len(),
            case_type = %case_type,
            "analysis submitted"
        );
        let result = self.api.submit_analysis(&files, case_type).await;

        let mut state = self.state.write().await;
        if state.generation != generation {
            debug!(session = %self.id, "session reset during analysis, discarding result");
            return Ok(SubmitOutcome::Discarded);
        }

        match result {
            Ok(report) => {
                let report = Arc::new(report);
                info!(
                    session = %self.id,
                    score = report.conformity_score,
                    documents = report.total_documents,
                    "analysis succeeded"
                );
                state.report = Some(Arc::clone(&report));
                state.status = UploadStatus::Succeeded;
                Ok(SubmitOutcome::Succeeded(report))
            }
            Err(e) => {
                warn!(session = %self.id, error = %e, "analysis failed");
                let message = e.user_message();
                state.error = Some(message.clone());
                state.status = UploadStatus::Failed;
                Ok(SubmitOutcome::Failed(message))
            }
        }
    }

    /// Clear report, error and staged files. Valid from any state.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        let generation = state.generation.wrapping_add(1);
        *state = UploadState::new();
        state.generation = generation;
        info!(session = %self.id, "upload session reset");
    }

    /// Hide the error banner, keeping the staged files.
    pub async fn dismiss_error(&self) {
        let mut state = self.state.write().await;
        if state.status == UploadStatus::Failed {
            state.error = None;
            state.status = UploadStatus::Idle;
            state.settle();
        }
    }

    pub async fn status(&self) -> UploadStatus {
        self.state.read().await.status
    }

    pub async fn staged_files(&self) -> Vec<StagedFile> {
        self.state.read().await.files.clone()
    }

    pub async fn report(&self) -> Option<Arc<AnalysisReport>> {
        self.state.read().await.report.clone()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub async fn snapshot(&self) -> UploadSnapshot {
        let state = self.state.read().await;
        UploadSnapshot {
            session_id: self.id.clone(),
            status: state.status,
            files: state
                .files
                .iter()
                .enumerate()
                .map(|(index, f)| StagedFileSummary {
                    index,
                    filename: f.filename().to_string(),
                    size_kb: f.size_kb(),
                })
                .collect(),
            error: state.error.clone(),
            has_report: state.report.is_some(),
        }
    }
}

impl std::fmt::Debug for UploadSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadSession").field("id", &self.id).finish()
    }
}
