//! Upload Session Integration Tests
//!
//! Lifecycle scenarios driven through `AppState`.

use std::sync::Arc;

use tokio::sync::Notify;

use aqua_verify::services::report_view::derive_view;
use aqua_verify::services::{ScoreBand, SubmitOutcome, UploadStatus};
use aqua_verify::{CaseType, ClientError};

use crate::support::{app_state, docx, pdf, report, ScriptedApi};

// ============================================================================
// Happy path
// ============================================================================

#[tokio::test]
async fn test_two_files_pa_analysis_scores_good() {
    let api = Arc::new(ScriptedApi::default().analysis(Ok(report(80.0))));
    let (state, _dir) = app_state(api.clone());

    state
        .upload()
        .add_files(vec![pdf("a.pdf"), docx("b.docx")])
        .await
        .unwrap();
    assert_eq!(state.upload().status().await, UploadStatus::FilesStaged);

    let outcome = state.run_analysis(Some(CaseType::PA)).await.unwrap();

    let report = match outcome {
        SubmitOutcome::Succeeded(report) => report,
        other => panic!("Expected success, got {:?}", other),
    };
    let view = derive_view(&report);
    assert_eq!(view.band, ScoreBand::Good);
    assert_eq!(view.total_documents, 2);
    assert_eq!(view.documents_caption, "2 documents analysés");
    assert_eq!(state.upload().status().await, UploadStatus::Succeeded);
    assert_eq!(api.submits(), 1);
}

// ============================================================================
// Failure and retry
// ============================================================================

#[tokio::test]
async fn test_backend_rejection_keeps_files_for_retry() {
    let api = Arc::new(
        ScriptedApi::default()
            .analysis(Err(ClientError::request(400, "Fichier invalide")))
            .analysis(Ok(report(100.0))),
    );
    let (state, _dir) = app_state(api.clone());
    state
        .upload()
        .add_files(vec![pdf("a.pdf"), docx("b.docx")])
        .await
        .unwrap();

    let outcome = state.run_analysis(None).await.unwrap();

    assert_eq!(outcome, SubmitOutcome::Failed("Fichier invalide".to_string()));
    assert_eq!(state.upload().status().await, UploadStatus::Failed);
    assert_eq!(state.upload().staged_files().await.len(), 2);
    assert_eq!(state.upload().error().await.as_deref(), Some("Fichier invalide"));

    let retry = state.run_analysis(None).await.unwrap();
    assert!(matches!(retry, SubmitOutcome::Succeeded(_)));
    assert!(state.upload().error().await.is_none());
    assert_eq!(api.submits(), 2);
}

#[tokio::test]
async fn test_network_failure_message_is_shown() {
    let api = Arc::new(
        ScriptedApi::default().analysis(Err(ClientError::network("connection refused"))),
    );
    let (state, _dir) = app_state(api);
    state.upload().add_files(vec![pdf("a.pdf")]).await.unwrap();

    state.run_analysis(None).await.unwrap();

    assert_eq!(
        state.upload().error().await.as_deref(),
        Some("Network error: connection refused")
    );
}

// ============================================================================
// Single-flight and reset
// ============================================================================

#[tokio::test]
async fn test_double_submit_issues_one_request() {
    let gate = Arc::new(Notify::new());
    let api = Arc::new(ScriptedApi::gated(gate.clone()).analysis(Ok(report(80.0))));
    let (state, _dir) = app_state(api.clone());
    state.upload().add_files(vec![pdf("a.pdf")]).await.unwrap();

    let upload = state.upload().clone();
    let first = tokio::spawn(async move { upload.submit(CaseType::PC).await });
    api.started.notified().await;

    let second = state.upload().submit(CaseType::PC).await;
    assert!(second.unwrap_err().is_validation());

    gate.notify_one();
    assert!(matches!(
        first.await.unwrap().unwrap(),
        SubmitOutcome::Succeeded(_)
    ));
    assert_eq!(api.submits(), 1);
}

#[tokio::test]
async fn test_reset_while_submitting_ignores_late_report() {
    let gate = Arc::new(Notify::new());
    let api = Arc::new(ScriptedApi::gated(gate.clone()).analysis(Ok(report(80.0))));
    let (state, _dir) = app_state(api.clone());
    state.upload().add_files(vec![pdf("a.pdf")]).await.unwrap();

    let upload = state.upload().clone();
    let pending = tokio::spawn(async move { upload.submit(CaseType::PC).await });
    api.started.notified().await;

    state.reset().await;
    gate.notify_one();

    assert_eq!(pending.await.unwrap().unwrap(), SubmitOutcome::Discarded);
    let snapshot = state.upload().snapshot().await;
    assert_eq!(snapshot.status, UploadStatus::Idle);
    assert!(snapshot.files.is_empty());
    assert!(!snapshot.has_report);
    assert!(snapshot.error.is_none());
}

#[tokio::test]
async fn test_new_analysis_after_success() {
    let api = Arc::new(
        ScriptedApi::default()
            .analysis(Ok(report(80.0)))
            .analysis(Ok(report(40.0))),
    );
    let (state, _dir) = app_state(api);
    state.upload().add_files(vec![pdf("a.pdf")]).await.unwrap();
    state.run_analysis(None).await.unwrap();

    state.reset().await;
    state.upload().add_files(vec![pdf("c.pdf")]).await.unwrap();
    let outcome = state.run_analysis(None).await.unwrap();

    match outcome {
        SubmitOutcome::Succeeded(report) => {
            assert_eq!(derive_view(&report).band, ScoreBand::Poor)
        }
        other => panic!("Expected success, got {:?}", other),
    }
}
