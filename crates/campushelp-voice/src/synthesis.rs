//! Speech synthesis adapter.
//!
//! At most one utterance plays at a time: `speak` cancels any in-flight
//! utterance before beginning the next one. The adapter tracks which
//! utterance is current so the reducer can ignore stale completion events
//! for cancelled utterances.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use campushelp_core::types::UtteranceId;

use crate::error::VoiceError;
use crate::events::{SynthesisEvent, SynthesisSink};

/// Approximate speaking speed at rate 1.0, used to size simulated playback.
const BASE_CHARS_PER_SEC: f32 = 14.0;

// =============================================================================
// Settings and utterances
// =============================================================================

/// Playback parameters for synthesized speech.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeechSettings {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            rate: 0.9,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

impl SpeechSettings {
    /// Set speech rate (0.25 = quarter speed, 4.0 = quadruple speed).
    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate.clamp(0.25, 4.0);
        self
    }

    /// Set pitch (0.5 = lower, 2.0 = higher).
    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch.clamp(0.5, 2.0);
        self
    }

    /// Set volume (0.0 to 1.0).
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }
}

/// A single unit of synthesized speech output.
#[derive(Debug, Clone)]
pub struct Utterance {
    pub id: UtteranceId,
    pub text: String,
    pub settings: SpeechSettings,
}

impl Utterance {
    pub fn new(text: &str, settings: SpeechSettings) -> Self {
        Self {
            id: UtteranceId::new(),
            text: text.to_string(),
            settings,
        }
    }

    /// Rough playback duration from text length and rate.
    pub fn estimated_duration(&self) -> Duration {
        let chars = self.text.chars().count() as f32;
        let secs = chars / (BASE_CHARS_PER_SEC * self.settings.rate);
        Duration::from_secs_f32(secs.max(0.2))
    }
}

// =============================================================================
// Backend trait and adapter
// =============================================================================

/// Host speech-synthesis backend.
///
/// `begin` starts playback of one utterance and must deliver
/// [`SynthesisEvent::Started`] followed by either `Finished` or `Failed`
/// through the sink. `cancel` stops an in-flight utterance and must be safe
/// to call at any time.
pub trait SynthesisBackend: Send {
    fn begin(&mut self, utterance: &Utterance, sink: SynthesisSink) -> Result<(), VoiceError>;
    fn cancel(&mut self);
}

/// Speech-synthesis adapter owning a backend and the current-utterance state.
pub struct Synthesizer {
    backend: Box<dyn SynthesisBackend>,
    settings: SpeechSettings,
    active: Option<UtteranceId>,
}

impl fmt::Debug for Synthesizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Synthesizer")
            .field("settings", &self.settings)
            .field("active", &self.active)
            .finish()
    }
}

impl Synthesizer {
    pub fn new(backend: Box<dyn SynthesisBackend>, settings: SpeechSettings) -> Self {
        Self {
            backend,
            settings,
            active: None,
        }
    }

    /// Cancel any playing utterance and begin a new one.
    pub fn speak(&mut self, text: &str, sink: &SynthesisSink) -> Result<UtteranceId, VoiceError> {
        self.backend.cancel();
        let utterance = Utterance::new(text, self.settings);
        let id = utterance.id;
        self.active = Some(id);
        if let Err(e) = self.backend.begin(&utterance, sink.clone()) {
            self.active = None;
            return Err(e);
        }
        Ok(id)
    }

    /// Whether `id` is the utterance currently being played.
    pub fn is_current(&self, id: UtteranceId) -> bool {
        self.active == Some(id)
    }

    /// Clear the current utterance if `id` matches it.
    ///
    /// Returns `true` when the utterance was current; stale completions for
    /// cancelled utterances return `false` and leave the state untouched.
    pub fn clear_current(&mut self, id: UtteranceId) -> bool {
        if self.active == Some(id) {
            self.active = None;
            true
        } else {
            false
        }
    }

    /// Cancel any in-flight utterance.
    pub fn cancel(&mut self) {
        self.backend.cancel();
        self.active = None;
    }

    pub fn active(&self) -> Option<UtteranceId> {
        self.active
    }

    pub fn settings(&self) -> SpeechSettings {
        self.settings
    }
}

// =============================================================================
// Backends
// =============================================================================

struct SimulatedPlayback {
    id: UtteranceId,
    sink: SynthesisSink,
    timer: JoinHandle<()>,
}

/// In-process synthesis backend that logs the utterance and completes after
/// a duration estimated from the text.
///
/// Must be driven from within a tokio runtime.
#[derive(Default)]
pub struct SimulatedSynthesis {
    playing: Option<SimulatedPlayback>,
}

impl SimulatedSynthesis {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SynthesisBackend for SimulatedSynthesis {
    fn begin(&mut self, utterance: &Utterance, sink: SynthesisSink) -> Result<(), VoiceError> {
        self.cancel();

        tracing::info!(
            utterance_id = %utterance.id,
            chars = utterance.text.chars().count(),
            rate = utterance.settings.rate,
            "Speaking"
        );
        sink.emit(SynthesisEvent::Started(utterance.id));

        let id = utterance.id;
        let duration = utterance.estimated_duration();
        let task_sink = sink.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            task_sink.emit(SynthesisEvent::Finished(id));
        });

        self.playing = Some(SimulatedPlayback { id, sink, timer });
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(playback) = self.playing.take() {
            playback.timer.abort();
            playback.sink.emit(SynthesisEvent::Failed {
                id: playback.id,
                reason: "cancelled".to_string(),
            });
        }
    }
}

impl Drop for SimulatedSynthesis {
    fn drop(&mut self) {
        if let Some(playback) = self.playing.take() {
            playback.timer.abort();
        }
    }
}

#[derive(Default)]
struct ManualInner {
    active: Option<(UtteranceId, SynthesisSink)>,
    begun: Vec<UtteranceId>,
    cancelled: Vec<UtteranceId>,
}

/// Test backend whose completion is driven explicitly through a cloned
/// controller handle.
#[derive(Clone, Default)]
pub struct ManualSynthesis {
    inner: Arc<Mutex<ManualInner>>,
}

impl ManualSynthesis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Utterances begun so far, in order.
    pub fn begun(&self) -> Vec<UtteranceId> {
        self.inner.lock().expect("manual synthesis poisoned").begun.clone()
    }

    /// Utterances cancelled before finishing, in order.
    pub fn cancelled(&self) -> Vec<UtteranceId> {
        self.inner
            .lock()
            .expect("manual synthesis poisoned")
            .cancelled
            .clone()
    }

    /// Complete the active utterance, if any.
    pub fn finish_active(&self) -> Option<UtteranceId> {
        let taken = self
            .inner
            .lock()
            .expect("manual synthesis poisoned")
            .active
            .take();
        taken.map(|(id, sink)| {
            sink.emit(SynthesisEvent::Finished(id));
            id
        })
    }

    /// Fail the active utterance, if any.
    pub fn fail_active(&self, reason: &str) -> Option<UtteranceId> {
        let taken = self
            .inner
            .lock()
            .expect("manual synthesis poisoned")
            .active
            .take();
        taken.map(|(id, sink)| {
            sink.emit(SynthesisEvent::Failed {
                id,
                reason: reason.to_string(),
            });
            id
        })
    }
}

impl SynthesisBackend for ManualSynthesis {
    fn begin(&mut self, utterance: &Utterance, sink: SynthesisSink) -> Result<(), VoiceError> {
        let mut inner = self.inner.lock().expect("manual synthesis poisoned");
        inner.begun.push(utterance.id);
        inner.active = Some((utterance.id, sink.clone()));
        drop(inner);
        sink.emit(SynthesisEvent::Started(utterance.id));
        Ok(())
    }

    fn cancel(&mut self) {
        let taken = self
            .inner
            .lock()
            .expect("manual synthesis poisoned")
            .active
            .take();
        if let Some((id, sink)) = taken {
            self.inner
                .lock()
                .expect("manual synthesis poisoned")
                .cancelled
                .push(id);
            sink.emit(SynthesisEvent::Failed {
                id,
                reason: "cancelled".to_string(),
            });
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
