//! Append-only transcript storage.
//!
//! [`MessageStore`] is the single owner of message identity and order.
//! Appending is the only way to add a message; the one permitted removal is
//! taking the pending placeholder off the end.

use codemate_proto::message::{Message, MessageId, Sender, Timestamp};

/// Errors returned by transcript mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A placeholder is already present; only one may exist at a time.
    #[error("a placeholder message ({0}) is already pending")]
    PlaceholderExists(MessageId),

    /// The last message is a regular message and may not be removed.
    #[error("message {0} is not a placeholder and cannot be removed")]
    NotPlaceholder(MessageId),

    /// The transcript holds no messages.
    #[error("transcript is empty")]
    Empty,
}

/// Ordered, append-only list of transcript messages.
#[derive(Debug, Clone)]
pub struct MessageStore {
    messages: Vec<Message>,
    next_id: MessageId,
}

impl MessageStore {
    /// Create an empty store. The first id handed out is `msg-1`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
            next_id: MessageId::from_raw(1),
        }
    }

    /// Append a regular message and return its id.
    pub fn append(&mut self, sender: Sender, text: impl Into<String>, at: Timestamp) -> MessageId {
        let id = self.allocate_id();
        self.messages.push(Message::new(id, sender, text, at));
        id
    }

    /// Append the assistant placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PlaceholderExists`] if a placeholder is already
    /// in the store.
    pub fn append_placeholder(&mut self, at: Timestamp) -> Result<MessageId, StoreError> {
        if let Some(existing) = self.placeholder() {
            return Err(StoreError::PlaceholderExists(existing.id));
        }
        let id = self.allocate_id();
        self.messages.push(Message::placeholder(id, at));
        Ok(id)
    }

    /// Remove the last message, which must be the placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Empty`] for an empty store and
    /// [`StoreError::NotPlaceholder`] if the last message is a regular one.
    pub fn remove_last(&mut self) -> Result<Message, StoreError> {
        match self.messages.last() {
            None => Err(StoreError::Empty),
            Some(last) if !last.is_placeholder => Err(StoreError::NotPlaceholder(last.id)),
            Some(_) => self.messages.pop().ok_or(StoreError::Empty),
        }
    }

    /// Number of messages, including a pending placeholder.
    #[must_use]
    pub fn count(&self) -> usize {
        self.messages.len()
    }

    /// Number of regular (non-placeholder) messages.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.messages.iter().filter(|m| !m.is_placeholder).count()
    }

    /// Whether the store holds no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The pending placeholder, if any.
    #[must_use]
    pub fn placeholder(&self) -> Option<&Message> {
        self.messages.iter().find(|m| m.is_placeholder)
    }

    /// All messages in insertion order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recently appended message.
    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    const fn allocate_id(&mut self) -> MessageId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }
}

impl Default for MessageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: Timestamp = Timestamp::from_millis(1_700_000_000_000);

    #[test]
    fn append_preserves_insertion_order() {
        let mut store = MessageStore::new();
        store.append(Sender::User, "one", T0);
        store.append(Sender::Assistant, "two", T0);
        store.append(Sender::User, "three", T0);

        let texts: Vec<&str> = store.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
        assert_eq!(store.count(), 3);
    }

    #[test]
    fn ids_strictly_increase_and_are_not_reused() {
        let mut store = MessageStore::new();
        let a = store.append(Sender::User, "a", T0);
        let p = store.append_placeholder(T0).unwrap();
        store.remove_last().unwrap();
        let b = store.append(Sender::Assistant, "b", T0);

        assert!(a < p);
        assert!(p < b);
        assert_ne!(p, b);
    }

    #[test]
    fn second_placeholder_is_rejected() {
        let mut store = MessageStore::new();
        let first = store.append_placeholder(T0).unwrap();
        let err = store.append_placeholder(T0).unwrap_err();
        assert_eq!(err, StoreError::PlaceholderExists(first));
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn remove_last_only_takes_placeholder() {
        let mut store = MessageStore::new();
        assert_eq!(store.remove_last().unwrap_err(), StoreError::Empty);

        let id = store.append(Sender::User, "keep me", T0);
        assert_eq!(store.remove_last().unwrap_err(), StoreError::NotPlaceholder(id));
        assert_eq!(store.count(), 1);

        store.append_placeholder(T0).unwrap();
        let removed = store.remove_last().unwrap();
        assert!(removed.is_placeholder);
        assert!(store.placeholder().is_none());
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn message_count_excludes_placeholder() {
        let mut store = MessageStore::new();
        store.append(Sender::User, "hi", T0);
        store.append_placeholder(T0).unwrap();
        assert_eq!(store.count(), 2);
        assert_eq!(store.message_count(), 1);
    }
}
