//! Speech capture adapter with a validated two-state machine.
//!
//! Capture has exactly two states:
//! - Idle -> Listening (toggle on)
//! - Listening -> Idle (toggle off, final result, error, or natural end)

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::error::VoiceError;
use crate::events::{RecognitionEvent, RecognitionSink};

/// Operational state of the speech-capture adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureState {
    /// No capture in progress. Ready to start.
    Idle,
    /// Actively listening for speech input.
    Listening,
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureState::Idle => write!(f, "Idle"),
            CaptureState::Listening => write!(f, "Listening"),
        }
    }
}

impl CaptureState {
    /// Returns whether a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: &CaptureState) -> bool {
        matches!(
            (self, target),
            (CaptureState::Idle, CaptureState::Listening)
                | (CaptureState::Listening, CaptureState::Idle)
        )
    }
}

/// Thread-safe state machine for capture state transitions.
///
/// All transitions are validated before being applied, returning an error if
/// the requested transition is not permitted.
#[derive(Debug, Clone)]
pub struct CaptureStateMachine {
    state: Arc<Mutex<CaptureState>>,
}

impl Default for CaptureStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureStateMachine {
    /// Create a new state machine initialized to `Idle`.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(CaptureState::Idle)),
        }
    }

    /// Returns the current state.
    pub fn current(&self) -> CaptureState {
        *self.state.lock().expect("capture state mutex poisoned")
    }

    /// Attempt to transition to the target state.
    pub fn transition(&self, target: CaptureState) -> Result<(), VoiceError> {
        let mut state = self.state.lock().expect("capture state mutex poisoned");
        if state.can_transition_to(&target) {
            tracing::debug!("Capture state: {} -> {}", *state, target);
            *state = target;
            Ok(())
        } else {
            Err(VoiceError::InvalidTransition {
                from: *state,
                to: target,
            })
        }
    }

    /// Force the state machine back to Idle.
    ///
    /// Used when the backend reports a result, error, or natural end; all of
    /// those imply capture is over regardless of the current state.
    pub fn reset(&self) {
        let mut state = self.state.lock().expect("capture state mutex poisoned");
        if *state != CaptureState::Idle {
            tracing::debug!("Capture state machine reset to Idle from {}", *state);
        }
        *state = CaptureState::Idle;
    }
}

/// Host speech-capture backend.
///
/// `start` begins one capture and must deliver at most one final
/// [`RecognitionEvent::Transcript`] followed by [`RecognitionEvent::Ended`]
/// (or a single [`RecognitionEvent::Error`]) through the sink. `stop` ends an
/// in-flight capture early and must be safe to call at any time.
pub trait RecognitionBackend: Send {
    fn start(&mut self, sink: RecognitionSink) -> Result<(), VoiceError>;
    fn stop(&mut self);
}

/// Speech-capture adapter owning a backend and the capture state machine.
pub struct Recognizer {
    backend: Box<dyn RecognitionBackend>,
    machine: CaptureStateMachine,
}

impl fmt::Debug for Recognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recognizer")
            .field("state", &self.machine.current())
            .finish()
    }
}

impl Recognizer {
    pub fn new(backend: Box<dyn RecognitionBackend>) -> Self {
        Self {
            backend,
            machine: CaptureStateMachine::new(),
        }
    }

    /// Start listening. Fails if capture is already active or the backend
    /// refuses to start.
    pub fn start(&mut self, sink: RecognitionSink) -> Result<(), VoiceError> {
        self.machine.transition(CaptureState::Listening)?;
        if let Err(e) = self.backend.start(sink) {
            self.machine.reset();
            return Err(e);
        }
        Ok(())
    }

    /// Stop an in-flight capture. Safe to call when idle.
    pub fn stop(&mut self) {
        if self.machine.current() == CaptureState::Listening {
            self.backend.stop();
            self.machine.reset();
        }
    }

    /// Return the adapter to idle after the backend reported completion.
    pub fn mark_idle(&self) {
        self.machine.reset();
    }

    pub fn is_listening(&self) -> bool {
        self.machine.current() == CaptureState::Listening
    }
}

/// In-process capture backend fed from a fixed list of transcripts.
///
/// Each `start` consumes the next transcript and delivers it immediately as
/// a final result, followed by the end-of-capture event. An exhausted script
/// just ends the capture.
#[derive(Debug, Default)]
pub struct ScriptedRecognition {
    transcripts: VecDeque<String>,
}

impl ScriptedRecognition {
    pub fn new(transcripts: Vec<String>) -> Self {
        Self {
            transcripts: transcripts.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.transcripts.len()
    }
}

impl RecognitionBackend for ScriptedRecognition {
    fn start(&mut self, sink: RecognitionSink) -> Result<(), VoiceError> {
        match self.transcripts.pop_front() {
            Some(text) => {
                tracing::debug!(chars = text.chars().count(), "Scripted transcript captured");
                sink.emit(RecognitionEvent::Transcript(text));
                sink.emit(RecognitionEvent::Ended);
            }
            None => {
                tracing::debug!("Scripted transcript list exhausted");
                sink.emit(RecognitionEvent::Ended);
            }
        }
        Ok(())
    }

    fn stop(&mut self) {}
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    fn collecting_sink() -> (RecognitionSink, Arc<StdMutex<Vec<RecognitionEvent>>>) {
        let seen: Arc<StdMutex<Vec<RecognitionEvent>>> = Arc::new(StdMutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let sink = RecognitionSink::new(move |ev| seen_clone.lock().unwrap().push(ev));
        (sink, seen)
    }

    // ---- CaptureState ----

    #[test]
    fn test_state_display() {
        assert_eq!(CaptureState::Idle.to_string(), "Idle");
        assert_eq!(CaptureState::Listening.to_string(), "Listening");
    }

    #[test]
    fn test_valid_transitions() {
        assert!(CaptureState::Idle.can_transition_to(&CaptureState::Listening));
        assert!(CaptureState::Listening.can_transition_to(&CaptureState::Idle));
    }

    #[test]
    fn test_invalid_transitions_to_self() {
        assert!(!CaptureState::Idle.can_transition_to(&CaptureState::Idle));
        assert!(!CaptureState::Listening.can_transition_to(&CaptureState::Listening));
    }

    // ---- CaptureStateMachine ----

    #[test]
    fn test_state_machine_round_trip() {
        let sm = CaptureStateMachine::new();
        assert_eq!(sm.current(), CaptureState::Idle);

        sm.transition(CaptureState::Listening).unwrap();
        assert_eq!(sm.current(), CaptureState::Listening);

        sm.transition(CaptureState::Idle).unwrap();
        assert_eq!(sm.current(), CaptureState::Idle);
    }

    #[test]
    fn test_state_machine_double_start_rejected() {
        let sm = CaptureStateMachine::new();
        sm.transition(CaptureState::Listening).unwrap();
        let result = sm.transition(CaptureState::Listening);
        assert!(matches!(
            result,
            Err(VoiceError::InvalidTransition {
                from: CaptureState::Listening,
                to: CaptureState::Listening,
            })
        ));
    }

    #[test]
    fn test_state_machine_reset_is_idempotent() {
        let sm = CaptureStateMachine::new();
        sm.reset();
        assert_eq!(sm.current(), CaptureState::Idle);

        sm.transition(CaptureState::Listening).unwrap();
        sm.reset();
        sm.reset();
        assert_eq!(sm.current(), CaptureState::Idle);
    }

    #[test]
    fn test_state_machine_clone_is_shared() {
        let sm1 = CaptureStateMachine::new();
        let sm2 = sm1.clone();
        sm1.transition(CaptureState::Listening).unwrap();
        assert_eq!(sm2.current(), CaptureState::Listening);
    }

    // ---- ScriptedRecognition ----

    #[test]
    fn test_scripted_delivers_transcripts_in_order() {
        let mut backend =
            ScriptedRecognition::new(vec!["first".to_string(), "second".to_string()]);
        let (sink, seen) = collecting_sink();

        backend.start(sink.clone()).unwrap();
        backend.start(sink).unwrap();

        let events = seen.lock().unwrap();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0], RecognitionEvent::Transcript("first".to_string()));
        assert_eq!(events[1], RecognitionEvent::Ended);
        assert_eq!(
            events[2],
            RecognitionEvent::Transcript("second".to_string())
        );
        assert_eq!(events[3], RecognitionEvent::Ended);
    }

    #[test]
    fn test_scripted_exhausted_ends_without_transcript() {
        let mut backend = ScriptedRecognition::new(vec![]);
        let (sink, seen) = collecting_sink();

        backend.start(sink).unwrap();

        let events = seen.lock().unwrap();
        assert_eq!(events.as_slice(), &[RecognitionEvent::Ended]);
    }

    #[test]
    fn test_scripted_remaining_counts_down() {
        let mut backend = ScriptedRecognition::new(vec!["one".to_string()]);
        assert_eq!(backend.remaining(), 1);
        let (sink, _) = collecting_sink();
        backend.start(sink).unwrap();
        assert_eq!(backend.remaining(), 0);
    }

    // ---- Recognizer ----

    #[test]
    fn test_recognizer_start_and_mark_idle() {
        let mut rec = Recognizer::new(Box::new(ScriptedRecognition::new(vec![
            "hello".to_string()
        ])));
        assert!(!rec.is_listening());

        let (sink, _) = collecting_sink();
        rec.start(sink).unwrap();
        assert!(rec.is_listening());

        rec.mark_idle();
        assert!(!rec.is_listening());
    }

    #[test]
    fn test_recognizer_double_start_fails() {
        let mut rec = Recognizer::new(Box::new(ScriptedRecognition::default()));
        let (sink, _) = collecting_sink();
        rec.start(sink.clone()).unwrap();
        assert!(rec.start(sink).is_err());
        assert!(rec.is_listening());
    }

    #[test]
    fn test_recognizer_stop_when_idle_is_noop() {
        let mut rec = Recognizer::new(Box::new(ScriptedRecognition::default()));
        rec.stop();
        assert!(!rec.is_listening());
    }

    #[test]
    fn test_recognizer_stop_returns_to_idle() {
        let mut rec = Recognizer::new(Box::new(ScriptedRecognition::default()));
        let (sink, _) = collecting_sink();
        rec.start(sink).unwrap();
        rec.stop();
        assert!(!rec.is_listening());
    }

    #[test]
    fn test_recognizer_backend_failure_returns_to_idle() {
        struct FailingBackend;
        impl RecognitionBackend for FailingBackend {
            fn start(&mut self, _sink: RecognitionSink) -> Result<(), VoiceError> {
                Err(VoiceError::Backend("device busy".to_string()))
            }
            fn stop(&mut self) {}
        }

        let mut rec = Recognizer::new(Box::new(FailingBackend));
        let (sink, _) = collecting_sink();
        assert!(rec.start(sink).is_err());
        assert!(!rec.is_listening());
    }
}
