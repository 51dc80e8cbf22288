//! Quick-action tags and the draft text each one inserts.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a quick-action tag is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown quick action: {0}")]
pub struct UnknownQuickAction(pub String);

/// One of the fixed quick-action buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuickAction {
    /// Ask for a code review.
    Review,
    /// Ask for debugging help.
    Debug,
    /// Ask for an optimization pass.
    Optimize,
    /// Ask for an explanation.
    Explain,
}

impl QuickAction {
    /// Every quick action in display order.
    pub const ALL: [Self; 4] = [Self::Review, Self::Debug, Self::Optimize, Self::Explain];

    /// Tag used in command names (`quick-action:<tag>`).
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Review => "review",
            Self::Debug => "debug",
            Self::Optimize => "optimize",
            Self::Explain => "explain",
        }
    }

    /// Short button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Review => "Review Code",
            Self::Debug => "Debug",
            Self::Optimize => "Optimize",
            Self::Explain => "Explain",
        }
    }

    /// Draft text inserted verbatim when the action is triggered.
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::Review => {
                "I have some code I'd like you to review for best practices and potential improvements."
            }
            Self::Debug => "I'm encountering an error in my code. Can you help me debug it?",
            Self::Optimize => "Can you help me optimize this code for better performance?",
            Self::Explain => "Can you explain how this code works and what it does?",
        }
    }
}

impl FromStr for QuickAction {
    type Err = UnknownQuickAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.tag() == s)
            .ok_or_else(|| UnknownQuickAction(s.to_string()))
    }
}

impl std::fmt::Display for QuickAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}
