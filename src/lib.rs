//! Aqua Verify - Client Library
//!
//! Client-side logic for the Aqua Verify compliance service:
//! - Session controllers for uploads and the assistant conversation
//! - Pure report view derivation
//! - Command handlers returning uniform response envelopes
//! - Configuration storage and terminal rendering

pub mod commands;
pub mod models;
pub mod render;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

// Re-export commonly used items from commands
pub use commands::{
    // Analysis commands
    analyze, clear_staged_files, dismiss_error, get_report, get_report_view,
    get_upload_status, remove_staged_file, reset_session, stage_files,
    // Chat commands
    get_suggestions, get_transcript, send_chat_message,
    // Health commands
    get_health,
    // Settings commands
    get_settings, update_settings,
};

// Re-export the shared data model
pub use aqua_verify_core::{
    AnalysisReport, CaseType, ChatMessage, ChatRole, ClientError, StagedFile, VerifyApi,
};

pub use state::AppState;
pub use utils::error::{AppError, AppResult};
