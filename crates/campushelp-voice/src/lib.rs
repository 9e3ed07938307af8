//! Voice I/O adapters for CampusHelp.
//!
//! Bridges the chat session to host speech capabilities: speech capture
//! (voice input) and speech synthesis (voice output). Both capabilities are
//! probed once at startup and are optional; every call site checks the
//! [`Capability`] variant instead of assuming presence, so the system
//! degrades to visual-only operation on hosts without either capability.
//!
//! Backends deliver completion through event sinks consumed by a single
//! reducer; the adapters themselves never mutate session state.

pub mod capability;
pub mod error;
pub mod events;
pub mod recognition;
pub mod synthesis;

pub use capability::{probe, Capability, VoiceCapabilities};
pub use error::VoiceError;
pub use events::{RecognitionEvent, RecognitionSink, SynthesisEvent, SynthesisSink};
pub use recognition::{CaptureState, RecognitionBackend, Recognizer, ScriptedRecognition};
pub use synthesis::{
    ManualSynthesis, SimulatedSynthesis, SpeechSettings, SynthesisBackend, Synthesizer, Utterance,
};
