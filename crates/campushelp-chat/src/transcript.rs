//! Append-only conversation store.

use campushelp_core::types::{Message, MessageId, Sender, Timestamp};

/// Ordered, append-only sequence of messages.
///
/// Appending always succeeds; there is no removal, reordering, or editing.
/// Ids are assigned from a counter, so they are strictly increasing in
/// append order.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<Message>,
    next_id: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            next_id: 1,
        }
    }

    /// A transcript seeded with bot greeting messages.
    pub fn with_greetings(greetings: &[String]) -> Self {
        let mut transcript = Self::new();
        for greeting in greetings {
            transcript.append(Sender::Bot, greeting);
        }
        transcript
    }

    /// Append a message and return it.
    pub fn append(&mut self, sender: Sender, text: &str) -> &Message {
        let message = Message {
            id: MessageId(self.next_id),
            sender,
            text: text.to_string(),
            timestamp: Timestamp::now(),
        };
        self.next_id += 1;
        self.messages.push(message);
        self.messages.last().expect("message just appended")
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
