//! Aqua Verify Core
//!
//! Data model, error taxonomy and backend API trait shared by the Aqua Verify
//! client workspace. This crate performs no I/O.
//!
//! ## Module Organization
//!
//! - `error` - Client error taxonomy (`ClientError`, `ClientResult`)
//! - `report` - Analysis report wire types and document-type labels
//! - `chat` - Chat transcript entries and request body
//! - `files` - Staged file blobs awaiting upload
//! - `api` - The `VerifyApi` trait implemented by the HTTP client
//! - `proxy` - Proxy configuration data types

pub mod api;
pub mod chat;
pub mod error;
pub mod files;
pub mod proxy;
pub mod report;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{ClientError, ClientResult};

// ── Backend Contract ───────────────────────────────────────────────────
pub use api::VerifyApi;

// ── Wire Types ─────────────────────────────────────────────────────────
pub use chat::{ChatMessage, ChatRequest, ChatRole};
pub use files::{StagedFile, SUPPORTED_EXTENSIONS};
pub use report::{
    format_score, AnalysisReport, CaseType, ComplianceIssue, Document, DocumentStatus,
    DocumentType, ProjectInfo,
};

// ── Proxy Types ────────────────────────────────────────────────────────
pub use proxy::{ProxyConfig, ProxyProtocol};
