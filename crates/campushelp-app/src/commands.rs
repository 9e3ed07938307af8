//! REPL command parsing.
//!
//! Lines starting with `:` are commands; everything else is chat input.
//! An empty line submits the pending (voice- or action-filled) input, which
//! the session treats as a no-op when nothing is pending.

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Chat text to submit (possibly empty).
    Submit(String),
    /// Toggle voice capture.
    ToggleVoice,
    /// List the quick actions.
    ListActions,
    /// Trigger a quick action by its 1-based display number.
    QuickAction(usize),
    /// Select the interface language.
    Language(String),
    Help,
    Quit,
    /// Unrecognized `:`-command, echoed back in the error message.
    Unknown(String),
}

/// Parse one input line.
pub fn parse(line: &str) -> Command {
    let trimmed = line.trim();
    if !trimmed.starts_with(':') {
        return Command::Submit(line.to_string());
    }

    let mut parts = trimmed[1..].split_whitespace();
    match parts.next().unwrap_or("") {
        "voice" | "v" => Command::ToggleVoice,
        "actions" => Command::ListActions,
        "act" => match parts.next().and_then(|n| n.parse::<usize>().ok()) {
            Some(number) => Command::QuickAction(number),
            None => Command::Unknown(trimmed.to_string()),
        },
        "lang" => match parts.next() {
            Some(code) => Command::Language(code.to_string()),
            None => Command::Unknown(trimmed.to_string()),
        },
        "help" | "h" => Command::Help,
        "quit" | "q" => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}
