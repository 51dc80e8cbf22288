//! Reply categories produced by the keyword classifier.

use serde::{Deserialize, Serialize};

/// The canned-reply bucket a user message falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Questions about functions or code in general.
    Code,
    /// Errors and debugging.
    Debug,
    /// Performance and optimization.
    Optimize,
    /// Requests for help or how-to questions.
    Help,
    /// Anything else.
    Generic,
}

impl Category {
    /// Every category, in classifier priority order.
    pub const ALL: [Self; 5] = [
        Self::Code,
        Self::Debug,
        Self::Optimize,
        Self::Help,
        Self::Generic,
    ];

    /// Lower-case name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Debug => "debug",
            Self::Optimize => "optimize",
            Self::Help => "help",
            Self::Generic => "generic",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
