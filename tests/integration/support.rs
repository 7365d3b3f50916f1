//! Test support: a scripted `VerifyApi` and a one-shot HTTP stub server.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use aqua_verify::storage::ConfigService;
use aqua_verify::{AnalysisReport, AppState, CaseType, ChatMessage, ClientError, StagedFile, VerifyApi};
use aqua_verify_core::ClientResult;

/// Backend double with queued results and an optional gate holding calls in flight.
#[derive(Default)]
pub struct ScriptedApi {
    analyses: Mutex<VecDeque<ClientResult<AnalysisReport>>>,
    replies: Mutex<VecDeque<ClientResult<ChatMessage>>>,
    pub submit_calls: AtomicUsize,
    pub chat_calls: AtomicUsize,
    pub chat_reports: Mutex<Vec<Option<AnalysisReport>>>,
    gate: Option<Arc<Notify>>,
    pub started: Arc<Notify>,
}

impl ScriptedApi {
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Default::default()
        }
    }

    pub fn analysis(self, result: ClientResult<AnalysisReport>) -> Self {
        self.analyses.lock().unwrap().push_back(result);
        self
    }

    pub fn reply(self, result: ClientResult<ChatMessage>) -> Self {
        self.replies.lock().unwrap().push_back(result);
        self
    }

    pub fn submits(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn chats(&self) -> usize {
        self.chat_calls.load(Ordering::SeqCst)
    }

    async fn hold(&self) {
        self.started.notify_one();
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl VerifyApi for ScriptedApi {
    async fn submit_analysis(
        &self,
        _files: &[StagedFile],
        _case_type: CaseType,
    ) -> ClientResult<AnalysisReport> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.hold().await;
        self.analyses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::network("unscripted")))
    }

    async fn send_chat_message(
        &self,
        _text: &str,
        report: Option<&AnalysisReport>,
    ) -> ClientResult<ChatMessage> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        self.chat_reports.lock().unwrap().push(report.cloned());
        self.hold().await;
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::network("unscripted")))
    }

    async fn check_health(&self) -> bool {
        true
    }
}

/// App state over a scripted backend with its config in a temp dir.
pub fn app_state(api: Arc<ScriptedApi>) -> (AppState, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = ConfigService::open(dir.path().join("config.json")).unwrap();
    (AppState::new(config, "http://127.0.0.1:8000/api", api), dir)
}

pub fn pdf(name: &str) -> StagedFile {
    StagedFile::new(name, b"%PDF-1.7".to_vec())
}

pub fn docx(name: &str) -> StagedFile {
    StagedFile::new(name, b"PK\x03\x04".to_vec())
}

/// Report as the backend would send it for two conformant documents.
pub fn report_json(score: f64) -> String {
    format!(
        r#"{{
            "project_info": {{"surface_m2": 180, "is_small_project": true, "address": null, "reference": "PC 071 076 24 00012"}},
            "documents_conformes": [
                {{"filename": "a.pdf", "document_type": "PC2", "status": "conforme", "confidence": 0.93, "issues": []}},
                {{"filename": "b.docx", "document_type": "PC4", "status": "conforme", "confidence": 0.81, "issues": []}}
            ],
            "documents_non_conformes": [],
            "documents_manquants": ["PC1"],
            "total_documents": 2,
            "conformity_score": {},
            "compliance_issues": null
        }}"#,
        score
    )
}

pub fn report(score: f64) -> AnalysisReport {
    serde_json::from_str(&report_json(score)).unwrap()
}

/// Serve exactly one HTTP response on a loopback port.
///
/// Returns the base URL (`http://127.0.0.1:{port}/api`) and a handle
/// resolving to the raw request that was received.
pub async fn serve_once(status: u16, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.to_string();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        request
    });

    (format!("http://{}/api", addr), handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            return String::from_utf8_lossy(&buf).into_owned();
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let content_length = head
        .lines()
        .find_map(|l| l.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok());
    let chunked = head.contains("transfer-encoding: chunked");

    loop {
        let body = &buf[header_end..];
        let done = match content_length {
            Some(len) => body.len() >= len,
            None if chunked => body.ends_with(b"0\r\n\r\n"),
            None => true,
        };
        if done {
            break;
        }
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    String::from_utf8_lossy(&buf).into_owned()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
