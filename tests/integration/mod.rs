//! Integration Tests Module
//!
//! End-to-end behavior of the Aqua Verify client: upload and chat sessions
//! driven through `AppState`, report views decoded from backend JSON, and
//! the HTTP client against a local stub server.

// Scripted backend and stub HTTP server
mod support;

// Upload lifecycle scenarios
mod upload_session_test;


// Report decoding and view derivation
mod report_view_test;
