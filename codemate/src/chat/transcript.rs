//! Formatted transcript view.
//!
//! Markup formatting runs exactly once per message: results are cached by
//! [`MessageId`] and only messages not yet seen are formatted on
//! [`TranscriptView::sync`]. Entries for removed messages (the placeholder)
//! are evicted.

use std::collections::HashMap;

use codemate_proto::format::{FormattedText, format_markup};
use codemate_proto::message::MessageId;

use super::store::MessageStore;

/// Cache of formatted message bodies.
#[derive(Debug, Default)]
pub struct TranscriptView {
    formatted: HashMap<MessageId, FormattedText>,
    format_calls: usize,
}

impl TranscriptView {
    /// Create an empty view.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the cache in line with the store.
    pub fn sync(&mut self, store: &MessageStore) {
        self.formatted
            .retain(|id, _| store.messages().iter().any(|m| m.id == *id));

        for msg in store.messages() {
            if msg.is_placeholder || self.formatted.contains_key(&msg.id) {
                continue;
            }
            self.formatted.insert(msg.id, format_markup(&msg.text));
            self.format_calls += 1;
        }
    }

    /// Formatted body of a message, if it has been synced.
    #[must_use]
    pub fn get(&self, id: MessageId) -> Option<&FormattedText> {
        self.formatted.get(&id)
    }

    /// How many times formatting has run since creation.
    #[must_use]
    pub const fn format_calls(&self) -> usize {
        self.format_calls
    }
}
