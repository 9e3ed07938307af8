use serde::{Deserialize, Serialize};

use crate::types::{LanguageCode, MessageId, Sender, Timestamp, UtteranceId};

/// All observable state changes in the assistant.
///
/// Events are emitted by the chat session reducer after each state change and
/// consumed by:
/// - The interactive front end (for rendering the scrollback and indicators)
/// - Tests (for asserting observable behavior)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AssistantEvent {
    /// A message was appended to the transcript.
    MessageAppended {
        id: MessageId,
        sender: Sender,
        text: String,
        timestamp: Timestamp,
    },

    /// The pending input text was replaced by a voice transcript or a
    /// quick action query.
    InputReplaced { text: String, timestamp: Timestamp },

    /// Voice capture started.
    ListeningStarted { timestamp: Timestamp },

    /// Voice capture stopped (toggle, final result, error, or natural end).
    ListeningStopped { timestamp: Timestamp },

    /// Voice capture failed; the session silently returned to idle.
    RecognitionFailed { reason: String, timestamp: Timestamp },

    /// A synthesized utterance started playing.
    SpeechStarted {
        utterance_id: UtteranceId,
        timestamp: Timestamp,
    },

    /// The current utterance finished playing.
    SpeechFinished {
        utterance_id: UtteranceId,
        timestamp: Timestamp,
    },

    /// The current utterance failed; the speaking flag was silently cleared.
    SpeechFailed {
        utterance_id: UtteranceId,
        reason: String,
        timestamp: Timestamp,
    },

    /// The interface language selection changed.
    LanguageChanged {
        language: LanguageCode,
        timestamp: Timestamp,
    },

    /// The session was torn down; pending reply timers were cancelled.
    SessionClosed {
        pending_replies_cancelled: usize,
        timestamp: Timestamp,
    },
}

impl AssistantEvent {
    /// Returns the timestamp of the event.
    pub fn timestamp(&self) -> Timestamp {
        match self {
            AssistantEvent::MessageAppended { timestamp, .. }
            | AssistantEvent::InputReplaced { timestamp, .. }
            | AssistantEvent::ListeningStarted { timestamp }
            | AssistantEvent::ListeningStopped { timestamp }
            | AssistantEvent::RecognitionFailed { timestamp, .. }
            | AssistantEvent::SpeechStarted { timestamp, .. }
            | AssistantEvent::SpeechFinished { timestamp, .. }
            | AssistantEvent::SpeechFailed { timestamp, .. }
            | AssistantEvent::LanguageChanged { timestamp, .. }
            | AssistantEvent::SessionClosed { timestamp, .. } => *timestamp,
        }
    }

    /// Returns a human-readable event name for logging.
    pub fn event_name(&self) -> &'static str {
        match self {
            AssistantEvent::MessageAppended { .. } => "message_appended",
            AssistantEvent::InputReplaced { .. } => "input_replaced",
            AssistantEvent::ListeningStarted { .. } => "listening_started",
            AssistantEvent::ListeningStopped { .. } => "listening_stopped",
            AssistantEvent::RecognitionFailed { .. } => "recognition_failed",
            AssistantEvent::SpeechStarted { .. } => "speech_started",
            AssistantEvent::SpeechFinished { .. } => "speech_finished",
            AssistantEvent::SpeechFailed { .. } => "speech_failed",
            AssistantEvent::LanguageChanged { .. } => "language_changed",
            AssistantEvent::SessionClosed { .. } => "session_closed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_timestamp() {
        let ts = Timestamp::now();
        let event = AssistantEvent::ListeningStarted { timestamp: ts };
        assert_eq!(event.timestamp(), ts);
    }

    #[test]
    fn test_event_name() {
        let event = AssistantEvent::MessageAppended {
            id: MessageId(1),
            sender: Sender::User,
            text: "check my fees".to_string(),
            timestamp: Timestamp::now(),
        };
        assert_eq!(event.event_name(), "message_appended");
    }

    #[test]
    fn test_event_serialization_all_variants() {
        let ts = Timestamp(1_700_000_000);
        let uid = UtteranceId::new();

        let events: Vec<AssistantEvent> = vec![
            AssistantEvent::MessageAppended {
                id: MessageId(1),
                sender: Sender::Bot,
                text: "hello".to_string(),
                timestamp: ts,
            },
            AssistantEvent::InputReplaced {
                text: "show my attendance record".to_string(),
                timestamp: ts,
            },
            AssistantEvent::ListeningStarted { timestamp: ts },
            AssistantEvent::ListeningStopped { timestamp: ts },
            AssistantEvent::RecognitionFailed {
                reason: "microphone lost".to_string(),
                timestamp: ts,
            },
            AssistantEvent::SpeechStarted {
                utterance_id: uid,
                timestamp: ts,
            },
            AssistantEvent::SpeechFinished {
                utterance_id: uid,
                timestamp: ts,
            },
            AssistantEvent::SpeechFailed {
                utterance_id: uid,
                reason: "device busy".to_string(),
                timestamp: ts,
            },
            AssistantEvent::LanguageChanged {
                language: LanguageCode::Te,
                timestamp: ts,
            },
            AssistantEvent::SessionClosed {
                pending_replies_cancelled: 2,
                timestamp: ts,
            },
        ];
        assert_eq!(events.len(), 10);

        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let back: AssistantEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(&back, event);
            assert_eq!(back.event_name(), event.event_name());
            assert_eq!(back.timestamp(), ts);
        }
    }

    #[test]
    fn test_event_names_are_distinct() {
        let ts = Timestamp(0);
        let uid = UtteranceId::new();
        let names = [
            AssistantEvent::InputReplaced {
                text: String::new(),
                timestamp: ts,
            }
            .event_name(),
            AssistantEvent::ListeningStarted { timestamp: ts }.event_name(),
            AssistantEvent::ListeningStopped { timestamp: ts }.event_name(),
            AssistantEvent::SpeechStarted {
                utterance_id: uid,
                timestamp: ts,
            }
            .event_name(),
            AssistantEvent::SpeechFinished {
                utterance_id: uid,
                timestamp: ts,
            }
            .event_name(),
        ];
        let mut unique = names.to_vec();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), names.len());
    }
}
