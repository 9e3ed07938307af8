//! Backend completion events and the sinks that deliver them.
//!
//! Speech backends are callback-driven: they report results, errors, and
//! lifecycle changes through a sink handed to them at start time. Sinks are
//! cheap to clone and safe to call from spawned tasks; the receiving side is
//! a single-threaded reducer, which is the only writer of listening and
//! speaking state.

use std::sync::Arc;

use campushelp_core::types::UtteranceId;

/// Events emitted by a speech-capture backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// A final transcript was produced; capture is over.
    Transcript(String),
    /// Capture failed; the adapter returns to idle with no transcript.
    Error(String),
    /// Capture ended without a (further) result.
    Ended,
}

/// Events emitted by a speech-synthesis backend.
#[derive(Clone, Debug, PartialEq)]
pub enum SynthesisEvent {
    /// The utterance started playing.
    Started(UtteranceId),
    /// The utterance finished playing.
    Finished(UtteranceId),
    /// The utterance failed or was cancelled before finishing.
    Failed { id: UtteranceId, reason: String },
}

/// Delivery channel for [`RecognitionEvent`]s.
#[derive(Clone)]
pub struct RecognitionSink(Arc<dyn Fn(RecognitionEvent) + Send + Sync>);

impl RecognitionSink {
    pub fn new(deliver: impl Fn(RecognitionEvent) + Send + Sync + 'static) -> Self {
        Self(Arc::new(deliver))
    }

    pub fn emit(&self, event: RecognitionEvent) {
        (self.0.as_ref())(event);
    }
}

impl std::fmt::Debug for RecognitionSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RecognitionSink")
    }
}

/// Delivery channel for [`SynthesisEvent`]s.
#[derive(Clone)]
pub struct SynthesisSink(Arc<dyn Fn(SynthesisEvent) + Send + Sync>);

impl SynthesisSink {
    pub fn new(deliver: impl Fn(SynthesisEvent) + Send + Sync + 'static) -> Self {
        Self(Arc::new(deliver))
    }

    pub fn emit(&self, event: SynthesisEvent) {
        (self.0.as_ref())(event);
    }
}

impl std::fmt::Debug for SynthesisSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SynthesisSink")
    }
}
