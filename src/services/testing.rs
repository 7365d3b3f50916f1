//! In-memory `VerifyApi` double for controller tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use aqua_verify_core::{
    AnalysisReport, CaseType, ChatMessage, ClientError, ClientResult, Document, DocumentStatus,
    DocumentType, ProjectInfo, StagedFile, VerifyApi,
};

/// Scripted backend. Results are popped in call order; an empty queue
/// answers with a network error.
#[derive(Default)]
pub struct MockVerifyApi {
    analysis_results: Mutex<VecDeque<ClientResult<AnalysisReport>>>,
    chat_results: Mutex<VecDeque<ClientResult<ChatMessage>>>,
    submit_calls: AtomicUsize,
    chat_calls: AtomicUsize,
    submitted: Mutex<Vec<(Vec<String>, CaseType)>>,
    chat_requests: Mutex<Vec<(String, Option<AnalysisReport>)>>,
    /// When set, calls park here until released
    gate: Option<Arc<Notify>>,
    /// Signalled each time a call reaches the backend
    pub started: Arc<Notify>,
    healthy: bool,
}

impl MockVerifyApi {
    pub fn new() -> Self {
        Self {
            healthy: true,
            ..Default::default()
        }
    }

    /// Hold every call until `gate.notify_one()` is called.
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new()
        }
    }

    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            ..Default::default()
        }
    }

    pub fn push_analysis(&self, result: ClientResult<AnalysisReport>) {
        self.analysis_results.lock().unwrap().push_back(result);
    }

    pub fn push_chat(&self, result: ClientResult<ChatMessage>) {
        self.chat_results.lock().unwrap().push_back(result);
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn chat_calls(&self) -> usize {
        self.chat_calls.load(Ordering::SeqCst)
    }

    pub fn submitted(&self) -> Vec<(Vec<String>, CaseType)> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn chat_requests(&self) -> Vec<(String, Option<AnalysisReport>)> {
        self.chat_requests.lock().unwrap().clone()
    }

    async fn wait_for_gate(&self) {
        self.started.notify_one();
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl VerifyApi for MockVerifyApi {
    async fn submit_analysis(
        &self,
        files: &[StagedFile],
        case_type: CaseType,
    ) -> ClientResult<AnalysisReport> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submitted.lock().unwrap().push((
            files.iter().map(|f| f.filename().to_string()).collect(),
            case_type,
        ));
        self.wait_for_gate().await;
        self.analysis_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::network("no scripted analysis result")))
    }

    async fn send_chat_message(
        &self,
        text: &str,
        report: Option<&AnalysisReport>,
    ) -> ClientResult<ChatMessage> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        self.chat_requests
            .lock()
            .unwrap()
            .push((text.to_string(), report.cloned()));
        self.wait_for_gate().await;
        self.chat_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::network("no scripted chat result")))
    }

    async fn check_health(&self) -> bool {
        self.healthy
    }
}

/// A report with `conformes` conformant PC-series documents.
pub fn sample_report(conformes: usize, score: f64) -> AnalysisReport {
    AnalysisReport {
        project_info: ProjectInfo::default(),
        documents_conformes: (0..conformes)
            .map(|i| Document {
                filename: format!("doc{}.pdf", i),
                document_type: DocumentType::from(format!("PC{}", i + 1)),
                status: DocumentStatus::Conforme,
                confidence: 0.9,
                extracted_text: None,
                issues: Vec::new(),
            })
            .collect(),
        documents_non_conformes: Vec::new(),
        documents_manquants: Vec::new(),
        total_documents: conformes as u32,
        conformity_score: score,
        compliance_issues: Vec::new(),
    }
}

pub fn pdf(name: &str) -> StagedFile {
    StagedFile::new(name, b"%PDF-1.7".to_vec())
}
