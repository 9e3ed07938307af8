//! Error types for the voice adapters.

use campushelp_core::error::AssistantError;

use crate::recognition::CaptureState;

/// Errors from the voice capture and synthesis adapters.
#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    #[error("invalid capture state transition: {from} -> {to}")]
    InvalidTransition {
        from: CaptureState,
        to: CaptureState,
    },
    #[error("voice backend error: {0}")]
    Backend(String),
}

impl From<VoiceError> for AssistantError {
    fn from(err: VoiceError) -> Self {
        AssistantError::Voice(err.to_string())
    }
}
