//! Transcript message types.
//!
//! A [`Message`] is immutable once created. The only transient entry is the
//! placeholder shown while the assistant is "thinking", which is removed and
//! replaced rather than edited.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a message within one transcript.
///
/// Ids are handed out by the transcript in creation order and are never
/// reused, so comparing two ids compares their creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(u64);

impl MessageId {
    /// Creates a message id from its raw sequence number.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw sequence number.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns the id that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "msg-{}", self.0)
    }
}

/// Identifier of one widget instance, used to tell instances apart in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new time-ordered session identifier (UUID v7).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sender {
    /// The person typing into the widget.
    User,
    /// The simulated assistant.
    Assistant,
}

impl Sender {
    /// Avatar glyph shown next to the message bubble.
    #[must_use]
    pub const fn avatar(self) -> &'static str {
        match self {
            Self::User => "\u{1f464}",
            Self::Assistant => "\u{1f916}",
        }
    }
}

/// Wall-clock creation time in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Creates a timestamp from epoch milliseconds.
    #[must_use]
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Returns the epoch milliseconds.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Creation-ordered identifier.
    pub id: MessageId,
    /// Author of the message.
    pub sender: Sender,
    /// Raw, unformatted text. Empty for the placeholder.
    pub text: String,
    /// When the message was created.
    pub created_at: Timestamp,
    /// Whether this is the transient "assistant is composing" entry.
    pub is_placeholder: bool,
}

impl Message {
    /// Creates a regular (non-placeholder) message.
    #[must_use]
    pub fn new(id: MessageId, sender: Sender, text: impl Into<String>, created_at: Timestamp) -> Self {
        Self {
            id,
            sender,
            text: text.into(),
            created_at,
            is_placeholder: false,
        }
    }

    /// Creates the assistant placeholder shown while a reply is pending.
    #[must_use]
    pub const fn placeholder(id: MessageId, created_at: Timestamp) -> Self {
        Self {
            id,
            sender: Sender::Assistant,
            text: String::new(),
            created_at,
            is_placeholder: true,
        }
    }
}
