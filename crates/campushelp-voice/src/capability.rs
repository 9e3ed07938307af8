//! Host capability probing.
//!
//! Speech capture and synthesis are platform capabilities that may or may
//! not exist. Each is probed exactly once at startup and wrapped in a
//! [`Capability`]; call sites match on the variant rather than assuming
//! presence.

use campushelp_core::config::VoiceConfig;

use crate::recognition::{Recognizer, ScriptedRecognition};
use crate::synthesis::{SimulatedSynthesis, SpeechSettings, Synthesizer};

/// An optional host capability.
#[derive(Debug)]
pub enum Capability<T> {
    /// The capability exists and is ready to use.
    Available(T),
    /// The host provides no such capability; callers degrade gracefully.
    Unavailable,
}

impl<T> Capability<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }

    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Capability::Available(inner) => Some(inner),
            Capability::Unavailable => None,
        }
    }

    pub fn as_mut(&mut self) -> Option<&mut T> {
        match self {
            Capability::Available(inner) => Some(inner),
            Capability::Unavailable => None,
        }
    }
}

/// The probed voice capabilities of this host.
#[derive(Debug)]
pub struct VoiceCapabilities {
    pub recognition: Capability<Recognizer>,
    pub synthesis: Capability<Synthesizer>,
}

impl VoiceCapabilities {
    /// Both capabilities absent; visual-only operation.
    pub fn none() -> Self {
        Self {
            recognition: Capability::Unavailable,
            synthesis: Capability::Unavailable,
        }
    }
}

/// Probe both voice capabilities from configuration.
pub fn probe(config: &VoiceConfig) -> VoiceCapabilities {
    let recognition = match config.capture.as_str() {
        "scripted" => {
            tracing::info!(
                transcripts = config.transcripts.len(),
                "Voice capture available (scripted)"
            );
            Capability::Available(Recognizer::new(Box::new(ScriptedRecognition::new(
                config.transcripts.clone(),
            ))))
        }
        mode => {
            tracing::info!(mode = %mode, "Voice capture unavailable");
            Capability::Unavailable
        }
    };

    let synthesis = match config.synthesis.as_str() {
        "simulated" => {
            tracing::info!("Speech synthesis available (simulated)");
            Capability::Available(Synthesizer::new(
                Box::new(SimulatedSynthesis::new()),
                SpeechSettings::default(),
            ))
        }
        mode => {
            tracing::info!(mode = %mode, "Speech synthesis unavailable");
            Capability::Unavailable
        }
    };

    VoiceCapabilities {
        recognition,
        synthesis,
    }
}
