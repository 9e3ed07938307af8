use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{AssistantError, Result};

/// Top-level configuration for the CampusHelp application.
///
/// Loaded from `~/.campushelp/config.toml` by default. Each section covers a
/// subsystem; missing sections and fields fall back to their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
}

impl AssistantConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AssistantConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| AssistantError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// Interface language code: en, te, hi, raj. Stored but not consulted
    /// by the resolver or renderer.
    pub language: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            language: "en".to_string(),
        }
    }
}

/// Chat session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Delay between a submission and the bot reply, in milliseconds.
    /// Approximate; not guaranteed exact.
    pub reply_delay_ms: u64,
    /// Delay between a quick action filling the input and its submission,
    /// in milliseconds.
    pub quick_action_delay_ms: u64,
    /// Bot messages seeded into the transcript at startup.
    pub greetings: Vec<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: 1000,
            quick_action_delay_ms: 100,
            greetings: default_greetings(),
        }
    }
}

fn default_greetings() -> Vec<String> {
    vec![
        "Hi there! \u{1f44b} Welcome to CampusHelp, your personal student assistant.".to_string(),
        "I can help you with fees, attendance, grades, course schedules, and much more. \
         How can I assist you today?"
            .to_string(),
    ]
}

/// Voice capability settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Speech synthesis backend: "simulated" or "off".
    pub synthesis: String,
    /// Speech capture backend: "scripted" or "off".
    pub capture: String,
    /// Canned transcripts consumed in order by the scripted capture backend.
    pub transcripts: Vec<String>,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            synthesis: "simulated".to_string(),
            capture: "off".to_string(),
            transcripts: Vec::new(),
        }
    }
}
