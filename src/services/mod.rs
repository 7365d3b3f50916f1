//! Services
//!
//! Session controllers and pure view derivations.
//! Services hold the client-side logic and are called by commands.

pub mod chat_format;
pub mod chat_session;
pub mod report_view;
pub mod upload_session;

#[cfg(test)]
pub(crate) mod testing;

pub use chat_format::{render_markdown, MarkdownStyle};
pub use chat_session::{ChatReply, ChatSession};
pub use report_view::{derive_view, ReportView, ScoreBand};
pub use upload_session::{SubmitOutcome, UploadSession, UploadSnapshot, UploadStatus};
