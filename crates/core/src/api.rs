//! Backend API Trait
//!
//! The three operations the client needs from the analysis backend. The
//! session controllers depend only on this trait, so they can run against the
//! real HTTP client or an in-memory double.

use async_trait::async_trait;

use crate::chat::ChatMessage;
use crate::error::ClientResult;
use crate::files::StagedFile;
use crate::report::{AnalysisReport, CaseType};

/// Contract with the analysis backend.
///
/// Every call is single-shot: implementations must not retry.
#[async_trait]
pub trait VerifyApi: Send + Sync {
    /// Upload `files` for analysis under the given case type.
    ///
    /// Fails with `Validation` when `files` is empty, `Request` on a
    /// non-success status and `Network` when no response was received.
    async fn submit_analysis(
        &self,
        files: &[StagedFile],
        case_type: CaseType,
    ) -> ClientResult<AnalysisReport>;

    /// Ask the assistant a question, optionally with the current report as
    /// context. Returns exactly one assistant message.
    async fn send_chat_message(
        &self,
        text: &str,
        report: Option<&AnalysisReport>,
    ) -> ClientResult<ChatMessage>;

    /// `true` only when the backend answers with a success status.
    async fn check_health(&self) -> bool;
}
