//! Error types for the conversational engine.

use campushelp_core::error::AssistantError;

/// Errors from the chat engine.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("unknown quick action index: {0}")]
    UnknownQuickAction(usize),
    #[error("session is closed")]
    SessionClosed,
}

impl From<ChatError> for AssistantError {
    fn from(err: ChatError) -> Self {
        AssistantError::Session(err.to_string())
    }
}
