pub mod config;
pub mod error;
pub mod events;
pub mod types;

pub use config::AssistantConfig;
pub use error::{AssistantError, Result};
pub use events::AssistantEvent;
pub use types::*;
