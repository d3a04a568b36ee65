//! Transcript and history data model.
//!
//! DESIGN
//! ======
//! Messages are append-only except for the extract placeholder, which is
//! removed by id once its request succeeds. Ids keep increasing across
//! [`Transcript::clear`] so a renderer can tell a fresh transcript from an
//! extended one.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Serialize};

/// Greeting shown at the top of every fresh conversation.
pub const WELCOME_TEXT: &str = "Please enter any website link for asking questions related to it.";

/// Placeholder shown while an extract request is outstanding.
pub const PROCESSING_TEXT: &str = "Processing website...";

/// Confirmation shown once a website has been extracted.
pub const EXTRACTED_TEXT: &str =
    "Content extracted successfully. You can now ask questions about this website.";

/// Stable identifier of a message within one controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageId(pub u64);

/// Author of a transcript message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
    Error,
}

impl Role {
    /// Lowercase name, also used as the CSS modifier class.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
            Self::Error => "error",
        }
    }
}

/// A single rendered chat message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub text: String,
}

/// Ordered list of messages for the live conversation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
    next_id: u64,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return its id.
    pub fn push(&mut self, role: Role, text: impl Into<String>) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(Message { id, role, text: text.into() });
        id
    }

    /// Remove the message with `id`. Returns `false` if it is already gone.
    pub fn remove(&mut self, id: MessageId) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| m.id != id);
        self.messages.len() != before
    }

    /// Drop every message. Ids are not reused.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// One question/answer exchange stored in server history.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

/// Previously processed website and its conversation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub url: String,
    pub conversation: Vec<QaPair>,
}

impl HistoryEntry {
    /// Short summary line for the history list, absent for empty conversations.
    #[must_use]
    pub fn preview(&self) -> Option<String> {
        if self.conversation.is_empty() {
            None
        } else {
            Some(format!("{} question(s)", self.conversation.len()))
        }
    }
}
