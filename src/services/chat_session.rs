//! Chat Session Controller
//!
//! Maintains the assistant transcript for the current analysis context.
//! The transcript only grows: user entries are appended before the request
//! is sent and are never withdrawn, and a failed reply becomes an apology.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use aqua_verify_core::{AnalysisReport, ChatMessage, ClientError, ClientResult, VerifyApi};

/// Greeting used before any analysis has completed
pub const GENERIC_GREETING: &str = "Bonjour ! Je suis l'assistant Aqua Verify. Déposez d'abord vos documents pour que je puisse vous aider.";

/// Assistant entry appended when the backend call fails
pub const APOLOGY_MESSAGE: &str = "Désolé, une erreur s'est produite. Veuillez réessayer.";

/// Quick prompts offered at the start of a conversation
pub const SUGGESTED_PROMPTS: [&str; 3] = [
    "Quels documents manquent ?",
    "Mon dossier est-il complet ?",
    "C'est quoi un PC2 ?",
];

/// Suggestions disappear once the transcript grows past this many entries
const SUGGESTIONS_MAX_TRANSCRIPT_LEN: usize = 2;

/// Greeting for the given analysis context.
pub fn greeting(report: Option<&AnalysisReport>) -> String {
    match report {
        None => GENERIC_GREETING.to_string(),
        Some(report) => format!(
            "Bonjour ! J'ai analysé vos {} documents. Votre score de conformité est de **{}%**. Posez-moi vos questions !",
            report.total_documents,
            report.score_display()
        ),
    }
}

/// What a completed `send_message` appended
#[derive(Debug, Clone, PartialEq)]
pub enum ChatReply {
    /// The backend's reply
    Answered(ChatMessage),
    /// The backend failed; the apology was appended instead
    Apology(ChatMessage),
    /// The context was replaced while the request was in flight
    Discarded,
}

impl ChatReply {
    /// The appended assistant entry, if any
    pub fn message(&self) -> Option<&ChatMessage> {
        match self {
            ChatReply::Answered(m) | ChatReply::Apology(m) => Some(m),
            ChatReply::Discarded => None,
        }
    }
}

#[derive(Debug)]
struct ChatState {
    transcript: Vec<ChatMessage>,
    report: Option<Arc<AnalysisReport>>,
    sending: bool,
    generation: u64,
}

impl ChatState {
    fn with_report(report: Option<Arc<AnalysisReport>>, generation: u64) -> Self {
        Self {
            transcript: vec![ChatMessage::assistant(greeting(report.as_deref()))],
            report,
            sending: false,
            generation,
        }
    }
}

/// Controller for the assistant conversation. Clones share the same transcript.
#[derive(Clone)]
pub struct ChatSession {
    api: Arc<dyn VerifyApi>,
    state: Arc<RwLock<ChatState>>,
}

impl ChatSession {
    pub fn new(api: Arc<dyn VerifyApi>) -> Self {
        Self {
            api,
            state: Arc::new(RwLock::new(ChatState::with_report(None, 0))),
        }
    }

    /// Replace the analysis context and restart the conversation.
    pub async fn set_report(&self, report: Option<Arc<AnalysisReport>>) {
        let mut state = self.state.write().await;
        let generation = state.generation.wrapping_add(1);
        info!(has_report = report.is_some(), "chat context replaced");
        *state = ChatState::with_report(report, generation);
    }

    /// Send a user message and append the reply.
    ///
    /// Blank text and sends while another reply is pending are rejected with
    /// a validation error before anything is appended.
    pub async fn send_message(&self, text: &str) -> ClientResult<ChatReply> {
        if text.trim().is_empty() {
            return Err(ClientError::validation("message must not be empty"));
        }

        let (report, generation) = {
            let mut state = self.state.write().await;
            if state.sending {
                return Err(ClientError::validation("a reply is already pending"));
            }
            state.sending = true;
            state.transcript.push(ChatMessage::user(text));
            (state.report.clone(), state.generation)
        };

        debug!(len = text.len(), has_report = report.is_some(), "sending chat message");
        let result = self.api.send_chat_message(text, report.as_deref()).await;

        let mut state = self.state.write().await;
        if state.generation != generation {
            debug!("chat context replaced during request, discarding reply");
            return Ok(ChatReply::Discarded);
        }
        state.sending = false;

        let reply = match result {
            Ok(message) => ChatReply::Answered(message),
            Err(e) => {
                warn!(error = %e, "chat request failed");
                ChatReply::Apology(ChatMessage::assistant(APOLOGY_MESSAGE))
            }
        };
        if let Some(message) = reply.message() {
            state.transcript.push(message.clone());
        }
        Ok(reply)
    }

    pub async fn transcript(&self) -> Vec<ChatMessage> {
        self.state.read().await.transcript.clone()
    }

    pub async fn is_sending(&self) -> bool {
        self.state.read().await.sending
    }

    pub async fn report(&self) -> Option<Arc<AnalysisReport>> {
        self.state.read().await.report.clone()
    }

    /// Quick prompts, offered only near the start of a conversation.
    pub async fn suggestions(&self) -> Vec<&'static str> {
        if self.state.read().await.transcript.len() <= SUGGESTIONS_MAX_TRANSCRIPT_LEN {
            SUGGESTED_PROMPTS.to_vec()
        } else {
            Vec::new()
        }
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession").finish_non_exhaustive()
    }
}
