//! Chat Commands
//!
//! Commands for the assistant conversation about the current analysis.

use aqua_verify_core::ChatMessage;

use crate::models::response::CommandResponse;
use crate::services::ChatReply;
use crate::state::AppState;

/// Send a message and return the appended assistant entry.
///
/// A backend failure still succeeds with the apology entry.
pub async fn send_chat_message(state: &AppState, text: &str) -> CommandResponse<ChatMessage> {
    match state.chat().send_message(text).await {
        Ok(ChatReply::Answered(message)) | Ok(ChatReply::Apology(message)) => {
            CommandResponse::ok(message)
        }
        Ok(ChatReply::Discarded) => CommandResponse::err("Conversation restarted before the reply arrived"),
        Err(e) => CommandResponse::err(e.to_string()),
    }
}

/// Get the full transcript
pub async fn get_transcript(state: &AppState) -> CommandResponse<Vec<ChatMessage>> {
    CommandResponse::ok(state.chat().transcript().await)
}

/// Get the quick prompts to offer, empty once the conversation is under way
pub async fn get_suggestions(state: &AppState) -> CommandResponse<Vec<String>> {
    CommandResponse::ok(
        state
            .chat()
            .suggestions()
            .await
            .into_iter()
            .map(String::from)
            .collect(),
    )
}
