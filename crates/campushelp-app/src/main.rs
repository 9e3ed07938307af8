//! CampusHelp application binary - composition root.
//!
//! Ties the crates together into a terminal chat:
//! 1. Parse CLI args and load configuration from TOML
//! 2. Probe the host voice capabilities (capture + synthesis)
//! 3. Build the chat session (greetings seeded)
//! 4. Run the interactive loop: stdin lines and session events on one task

mod cli;
mod commands;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use campushelp_chat::{ChatSession, QUICK_ACTIONS};
use campushelp_core::config::AssistantConfig;
use campushelp_core::events::AssistantEvent;
use campushelp_core::types::{LanguageCode, Message, Sender};
use campushelp_voice::{probe, VoiceCapabilities};

use crate::cli::CliArgs;
use crate::commands::Command;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let config_path = args.resolve_config_path();
    let config = AssistantConfig::load_or_default(&config_path);

    let log_level = args.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting CampusHelp v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_path.display(), "Configuration loaded");

    let capabilities = if args.no_voice {
        tracing::info!("Voice disabled via --no-voice");
        VoiceCapabilities::none()
    } else {
        probe(&config.voice)
    };

    let (mut session, mut events_rx) = ChatSession::new(
        &config.chat,
        capabilities.recognition,
        capabilities.synthesis,
    );

    let language = LanguageCode::parse(&args.resolve_language(&config.general.language))
        .unwrap_or_default();
    session.set_language(language);

    print_banner(&session);
    for message in session.transcript().messages() {
        print_message(message);
    }
    println!();
    println!("Ask about fees, attendance, grades, schedules... (:help for commands)");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match commands::parse(&line) {
                    Command::Quit => break,
                    Command::Help => print_help(),
                    Command::ListActions => print_actions(),
                    Command::ToggleVoice => {
                        if !session.has_voice_capture() {
                            println!("voice input is not available on this host");
                        }
                        render(&session.toggle_listening());
                    }
                    Command::QuickAction(number) => {
                        match number
                            .checked_sub(1)
                            .map(|index| session.trigger_quick_action(index))
                        {
                            Some(Ok(events)) => render(&events),
                            _ => println!("no such quick action; see :actions"),
                        }
                    }
                    Command::Language(code) => match LanguageCode::parse(&code) {
                        Some(language) => render(&session.set_language(language)),
                        None => println!("unknown language '{code}' (en, te, hi, raj)"),
                    },
                    Command::Unknown(command) => {
                        println!("unknown command '{command}'; type :help");
                    }
                    Command::Submit(text) => render(&session.submit_line(&text)),
                }
            }
            Some(event) = events_rx.recv() => {
                let events = session.handle(event);
                render(&events);
            }
        }
    }

    render(&session.close());
    tracing::info!("CampusHelp stopped");
    Ok(())
}

fn render(events: &[AssistantEvent]) {
    for event in events {
        tracing::debug!(event = event.event_name(), "Session event");
        match event {
            AssistantEvent::MessageAppended {
                sender,
                text,
                timestamp,
                ..
            } => {
                println!(
                    "[{}] {}: {}",
                    timestamp.clock_label(),
                    display_name(*sender),
                    text
                );
            }
            AssistantEvent::InputReplaced { text, .. } => {
                println!("(input ready: \"{text}\" — press Enter to send)");
            }
            AssistantEvent::ListeningStarted { .. } => {
                println!("\u{1f3a4} listening... (:voice to stop)");
            }
            AssistantEvent::ListeningStopped { .. } => {
                println!("\u{1f3a4} stopped listening");
            }
            AssistantEvent::SpeechStarted { .. } => {
                println!("\u{1f50a} speaking...");
            }
            AssistantEvent::SpeechFinished { .. } => {
                println!("\u{1f50a} done");
            }
            // Silent degradation: diagnostics only, no user-facing error.
            AssistantEvent::RecognitionFailed { .. } | AssistantEvent::SpeechFailed { .. } => {}
            AssistantEvent::LanguageChanged { language, .. } => {
                println!("language set to {}", language.label());
            }
            AssistantEvent::SessionClosed { .. } => {}
            _ => {}
        }
    }
}

fn display_name(sender: Sender) -> &'static str {
    match sender {
        Sender::Bot => "campushelp",
        Sender::User => "you",
    }
}

fn print_message(message: &Message) {
    println!(
        "[{}] {}: {}",
        message.timestamp.clock_label(),
        display_name(message.sender),
        message.text
    );
}

fn print_banner(session: &ChatSession) {
    println!("CampusHelp — AI Student Assistant");
    let languages: Vec<&str> = LanguageCode::all().iter().map(|l| l.label()).collect();
    println!(
        "language: {} (available: {})",
        session.language().label(),
        languages.join(", ")
    );
    let voice = match (session.has_voice_capture(), session.has_voice_output()) {
        (true, true) => "voice input and output",
        (true, false) => "voice input only",
        (false, true) => "voice output only",
        (false, false) => "text only",
    };
    println!("voice: {voice}");
    println!();
}

fn print_help() {
    println!("commands:");
    println!("  <text>     ask a question (Enter alone sends pending voice input)");
    println!("  :voice     toggle voice capture");
    println!("  :actions   list quick actions");
    println!("  :act N     trigger quick action N");
    println!("  :lang CODE select language (en, te, hi, raj)");
    println!("  :help      show this help");
    println!("  :quit      exit");
}

fn print_actions() {
    println!("quick actions:");
    for (number, action) in QUICK_ACTIONS.iter().enumerate() {
        println!(
            "  {}. {} {} — \"{}\"",
            number + 1,
            action.icon,
            action.label,
            action.query
        );
    }
}
