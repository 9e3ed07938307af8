//! Conversational engine for CampusHelp.
//!
//! Provides keyword-based response resolution, the append-only conversation
//! transcript, quick-action shortcuts, and the chat session that wires user
//! submissions to delayed bot replies and the voice adapters.

pub mod error;
pub mod quick_actions;
pub mod responder;
pub mod session;
pub mod transcript;

pub use error::ChatError;
pub use quick_actions::{QuickAction, QUICK_ACTIONS};
pub use responder::{Responder, Topic, FALLBACK_REPLY};
pub use session::{ChatSession, SessionEvent};
pub use transcript::Transcript;
