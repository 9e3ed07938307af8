//! Chat session: submission pipeline and state reducer.
//!
//! The session owns the transcript, the resolver, the ephemeral UI state,
//! and the probed voice capabilities. Delayed work (bot replies, deferred
//! quick-action submission) and voice backend callbacks are all delivered as
//! [`SessionEvent`]s over one channel and applied by [`ChatSession::handle`]
//! on a single task, so the reducer is the only writer of the listening and
//! speaking flags.
//!
//! Every mutating method returns the [`AssistantEvent`]s describing what
//! changed, for the front end to render.
//!
//! Must be driven from within a tokio runtime: reply timers are spawned
//! tasks, tracked in a `JoinSet` and aborted on [`ChatSession::close`] so no
//! timer can mutate a torn-down session.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use campushelp_core::config::ChatConfig;
use campushelp_core::events::AssistantEvent;
use campushelp_core::types::{LanguageCode, Message, Sender, Timestamp};
use campushelp_voice::{
    Capability, RecognitionEvent, RecognitionSink, Recognizer, SynthesisEvent, SynthesisSink,
    Synthesizer,
};

use crate::error::ChatError;
use crate::quick_actions;
use crate::responder::Responder;
use crate::transcript::Transcript;

/// Internal events delivered to the session reducer.
#[derive(Debug)]
pub enum SessionEvent {
    /// The artificial reply delay for a submitted query elapsed.
    ReplyDue { query: String },
    /// The short quick-action delay elapsed; submit the pending input.
    SubmitPending,
    /// A speech-capture backend event.
    Recognition(RecognitionEvent),
    /// A speech-synthesis backend event.
    Synthesis(SynthesisEvent),
}

/// Interactive chat session.
pub struct ChatSession {
    transcript: Transcript,
    responder: Responder,
    input: String,
    listening: bool,
    speaking: bool,
    language: LanguageCode,
    recognition: Capability<Recognizer>,
    synthesis: Capability<Synthesizer>,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
    timers: JoinSet<()>,
    reply_delay: Duration,
    quick_action_delay: Duration,
    closed: bool,
}

impl ChatSession {
    /// Create a session and the event receiver the caller must drain into
    /// [`ChatSession::handle`].
    pub fn new(
        config: &ChatConfig,
        recognition: Capability<Recognizer>,
        synthesis: Capability<Synthesizer>,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let session = Self {
            transcript: Transcript::with_greetings(&config.greetings),
            responder: Responder::new(),
            input: String::new(),
            listening: false,
            speaking: false,
            language: LanguageCode::default(),
            recognition,
            synthesis,
            events_tx,
            timers: JoinSet::new(),
            reply_delay: Duration::from_millis(config.reply_delay_ms),
            quick_action_delay: Duration::from_millis(config.quick_action_delay_ms),
            closed: false,
        };
        (session, events_rx)
    }

    // -----------------------------------------------------------------
    // Submission pipeline
    // -----------------------------------------------------------------

    /// Treat `line` as typed input: non-empty lines replace the pending
    /// input, then the pipeline runs on whatever input is pending. An empty
    /// line therefore submits a voice- or action-filled input, if any.
    pub fn submit_line(&mut self, line: &str) -> Vec<AssistantEvent> {
        if !line.trim().is_empty() {
            self.input = line.to_string();
        }
        self.submit()
    }

    /// Run the submission pipeline on the pending input.
    ///
    /// A trimmed-empty input is a no-op: nothing is appended and the
    /// resolver is not invoked. Otherwise the user message appends
    /// immediately, the input clears, and an independent timer is spawned
    /// for the bot reply. Timers are never serialized against each other:
    /// rapid submissions each get their own reply, appended in completion
    /// order.
    pub fn submit(&mut self) -> Vec<AssistantEvent> {
        if self.closed {
            tracing::warn!("Submission ignored: session is closed");
            return Vec::new();
        }

        let text = self.input.trim().to_string();
        self.input.clear();
        if text.is_empty() {
            return Vec::new();
        }

        let events = vec![Self::appended(self.transcript.append(Sender::User, &text))];

        let tx = self.events_tx.clone();
        let delay = self.reply_delay;
        self.timers.spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(SessionEvent::ReplyDue { query: text });
        });

        events
    }

    /// Set the pending input to a quick action's query and schedule its
    /// submission after a short delay, mirroring a user clicking the
    /// shortcut. The resulting message pair is identical to typing the query
    /// and submitting it manually.
    pub fn trigger_quick_action(&mut self, index: usize) -> Result<Vec<AssistantEvent>, ChatError> {
        if self.closed {
            return Err(ChatError::SessionClosed);
        }
        let action = quick_actions::get(index).ok_or(ChatError::UnknownQuickAction(index))?;

        self.input = action.query.to_string();
        tracing::debug!(label = action.label, "Quick action triggered");

        let tx = self.events_tx.clone();
        let delay = self.quick_action_delay;
        self.timers.spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(SessionEvent::SubmitPending);
        });

        Ok(vec![AssistantEvent::InputReplaced {
            text: action.query.to_string(),
            timestamp: Timestamp::now(),
        }])
    }

    // -----------------------------------------------------------------
    // Voice control
    // -----------------------------------------------------------------

    /// Start or stop voice capture. Inert when the capability is absent or
    /// the backend refuses to start; failures are diagnostic-only.
    pub fn toggle_listening(&mut self) -> Vec<AssistantEvent> {
        if self.closed {
            return Vec::new();
        }
        let sink = self.recognition_sink();
        match &mut self.recognition {
            Capability::Unavailable => {
                tracing::debug!("Voice capture unavailable; toggle ignored");
                Vec::new()
            }
            Capability::Available(recognizer) => {
                if self.listening {
                    recognizer.stop();
                    self.listening = false;
                    vec![AssistantEvent::ListeningStopped {
                        timestamp: Timestamp::now(),
                    }]
                } else {
                    match recognizer.start(sink) {
                        Ok(()) => {
                            self.listening = true;
                            vec![AssistantEvent::ListeningStarted {
                                timestamp: Timestamp::now(),
                            }]
                        }
                        Err(e) => {
                            tracing::debug!(error = %e, "Voice capture failed to start");
                            Vec::new()
                        }
                    }
                }
            }
        }
    }

    /// Store the interface language selection. Cosmetic: nothing else
    /// consults it.
    pub fn set_language(&mut self, language: LanguageCode) -> Vec<AssistantEvent> {
        self.language = language;
        vec![AssistantEvent::LanguageChanged {
            language,
            timestamp: Timestamp::now(),
        }]
    }

    // -----------------------------------------------------------------
    // Reducer
    // -----------------------------------------------------------------

    /// Apply one internal event. Events arriving after [`close`](Self::close)
    /// are ignored.
    pub fn handle(&mut self, event: SessionEvent) -> Vec<AssistantEvent> {
        // Reap timers that have already delivered their event.
        while self.timers.try_join_next().is_some() {}

        if self.closed {
            tracing::debug!("Event after close ignored");
            return Vec::new();
        }

        match event {
            SessionEvent::ReplyDue { query } => self.deliver_reply(&query),
            SessionEvent::SubmitPending => self.submit(),
            SessionEvent::Recognition(ev) => self.apply_recognition(ev),
            SessionEvent::Synthesis(ev) => self.apply_synthesis(ev),
        }
    }

    fn deliver_reply(&mut self, query: &str) -> Vec<AssistantEvent> {
        let reply = self.responder.resolve(query);
        let events = vec![Self::appended(self.transcript.append(Sender::Bot, reply))];

        let sink = self.synthesis_sink();
        if let Capability::Available(synthesizer) = &mut self.synthesis {
            match synthesizer.speak(reply, &sink) {
                Ok(utterance_id) => {
                    tracing::debug!(utterance_id = %utterance_id, "Reply handed to synthesis")
                }
                Err(e) => tracing::debug!(error = %e, "Synthesis refused the reply"),
            }
        }

        events
    }

    fn apply_recognition(&mut self, event: RecognitionEvent) -> Vec<AssistantEvent> {
        if let Capability::Available(recognizer) = &self.recognition {
            recognizer.mark_idle();
        }

        let mut events = Vec::new();
        if self.listening {
            self.listening = false;
            events.push(AssistantEvent::ListeningStopped {
                timestamp: Timestamp::now(),
            });
        }

        match event {
            RecognitionEvent::Transcript(text) => {
                self.input = text.clone();
                events.push(AssistantEvent::InputReplaced {
                    text,
                    timestamp: Timestamp::now(),
                });
            }
            RecognitionEvent::Error(reason) => {
                tracing::debug!(reason = %reason, "Voice capture error; returning to idle");
                events.push(AssistantEvent::RecognitionFailed {
                    reason,
                    timestamp: Timestamp::now(),
                });
            }
            RecognitionEvent::Ended => {}
        }
        events
    }

    fn apply_synthesis(&mut self, event: SynthesisEvent) -> Vec<AssistantEvent> {
        let Capability::Available(synthesizer) = &mut self.synthesis else {
            return Vec::new();
        };

        match event {
            SynthesisEvent::Started(id) => {
                if synthesizer.is_current(id) {
                    self.speaking = true;
                    vec![AssistantEvent::SpeechStarted {
                        utterance_id: id,
                        timestamp: Timestamp::now(),
                    }]
                } else {
                    Vec::new()
                }
            }
            SynthesisEvent::Finished(id) => {
                if synthesizer.clear_current(id) {
                    self.speaking = false;
                    vec![AssistantEvent::SpeechFinished {
                        utterance_id: id,
                        timestamp: Timestamp::now(),
                    }]
                } else {
                    Vec::new()
                }
            }
            SynthesisEvent::Failed { id, reason } => {
                if synthesizer.clear_current(id) {
                    tracing::debug!(reason = %reason, "Utterance failed; clearing speaking flag");
                    self.speaking = false;
                    vec![AssistantEvent::SpeechFailed {
                        utterance_id: id,
                        reason,
                        timestamp: Timestamp::now(),
                    }]
                } else {
                    // Stale completion for a cancelled utterance.
                    Vec::new()
                }
            }
        }
    }

    // -----------------------------------------------------------------
    // Teardown
    // -----------------------------------------------------------------

    /// Tear the session down: abort every pending timer, stop capture, and
    /// cancel any in-flight utterance. No bot reply can append afterwards.
    pub fn close(&mut self) -> Vec<AssistantEvent> {
        if self.closed {
            return Vec::new();
        }
        while self.timers.try_join_next().is_some() {}
        let pending = self.timers.len();
        self.timers.abort_all();

        if let Capability::Available(recognizer) = &mut self.recognition {
            recognizer.stop();
        }
        if let Capability::Available(synthesizer) = &mut self.synthesis {
            synthesizer.cancel();
        }

        self.closed = true;
        self.listening = false;
        self.speaking = false;
        tracing::info!(pending_replies_cancelled = pending, "Session closed");

        vec![AssistantEvent::SessionClosed {
            pending_replies_cancelled: pending,
            timestamp: Timestamp::now(),
        }]
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking
    }

    pub fn language(&self) -> LanguageCode {
        self.language
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn has_voice_capture(&self) -> bool {
        self.recognition.is_available()
    }

    pub fn has_voice_output(&self) -> bool {
        self.synthesis.is_available()
    }

    // -----------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------

    fn appended(message: &Message) -> AssistantEvent {
        AssistantEvent::MessageAppended {
            id: message.id,
            sender: message.sender,
            text: message.text.clone(),
            timestamp: message.timestamp,
        }
    }

    fn recognition_sink(&self) -> RecognitionSink {
        let tx = self.events_tx.clone();
        RecognitionSink::new(move |ev| {
            let _ = tx.send(SessionEvent::Recognition(ev));
        })
    }

    fn synthesis_sink(&self) -> SynthesisSink {
        let tx = self.events_tx.clone();
        SynthesisSink::new(move |ev| {
            let _ = tx.send(SessionEvent::Synthesis(ev));
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
