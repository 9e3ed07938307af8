use std::fmt;

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

/// Who authored a message in the conversation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The assistant.
    Bot,
    /// The student.
    User,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::Bot => write!(f, "bot"),
            Sender::User => write!(f, "user"),
        }
    }
}

/// Interface language offered by the language selector.
///
/// The selection is stored and reported but does not drive any translation;
/// replies are always rendered in their canned form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    #[default]
    En,
    Te,
    Hi,
    Raj,
}

impl LanguageCode {
    /// All selectable languages, in display order.
    pub fn all() -> &'static [LanguageCode] {
        &[
            LanguageCode::En,
            LanguageCode::Te,
            LanguageCode::Hi,
            LanguageCode::Raj,
        ]
    }

    /// Short code as used in config files and the `:lang` command.
    pub fn code(&self) -> &'static str {
        match self {
            LanguageCode::En => "en",
            LanguageCode::Te => "te",
            LanguageCode::Hi => "hi",
            LanguageCode::Raj => "raj",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            LanguageCode::En => "English",
            LanguageCode::Te => "Telugu",
            LanguageCode::Hi => "Hindi",
            LanguageCode::Raj => "Rajasthani",
        }
    }

    /// Parse a short code, case-insensitively.
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" => Some(LanguageCode::En),
            "te" => Some(LanguageCode::Te),
            "hi" => Some(LanguageCode::Hi),
            "raj" => Some(LanguageCode::Raj),
            _ => None,
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// =============================================================================
// Newtype Wrappers - Identity and time
// =============================================================================

/// Unique identifier for a message within one transcript.
///
/// Assigned from a per-transcript counter, so ids are strictly increasing
/// in append order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a single synthesized utterance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UtteranceId(pub Uuid);

impl UtteranceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UtteranceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UtteranceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wall-clock timestamp in epoch seconds.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// The current local time.
    pub fn now() -> Self {
        Self(Local::now().timestamp())
    }

    /// 24-hour `HH:MM` display form in local time.
    pub fn clock_label(&self) -> String {
        Local
            .timestamp_opt(self.0, 0)
            .single()
            .map(|dt| dt.format("%H:%M").to_string())
            .unwrap_or_else(|| self.0.to_string())
    }
}

// =============================================================================
// Message
// =============================================================================

/// One entry in the conversation scrollback.
///
/// Messages are immutable once created; the transcript only ever appends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub text: String,
    pub timestamp: Timestamp,
}

// =============================================================================
// Tests
// =============================================================================
