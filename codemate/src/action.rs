//! Named widget commands.
//!
//! Every control the widget exposes maps to one [`Action`]. Key bindings and
//! tests both go through the same table, so a handler can be invoked by name
//! without simulating terminal input.

use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use codemate_proto::quick_action::{QuickAction, UnknownQuickAction};

/// Errors from parsing a command name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionParseError {
    /// The name is not in the command table.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// `quick-action:` was followed by an unknown tag.
    #[error(transparent)]
    UnknownQuickAction(#[from] UnknownQuickAction),
}

/// A widget command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Submit the draft.
    Send,
    /// Flip the minimized flag.
    ToggleMinimize,
    /// Flip the expanded flag.
    ToggleExpand,
    /// Open the file picker.
    Attach,
    /// Copy the latest code snippet.
    Copy,
    /// Fill the draft from a quick-action template.
    QuickAction(QuickAction),
}

impl Action {
    /// Every command, in help-text order.
    pub const ALL: [Self; 9] = [
        Self::Send,
        Self::ToggleMinimize,
        Self::ToggleExpand,
        Self::Attach,
        Self::Copy,
        Self::QuickAction(QuickAction::Review),
        Self::QuickAction(QuickAction::Debug),
        Self::QuickAction(QuickAction::Optimize),
        Self::QuickAction(QuickAction::Explain),
    ];

    /// The key that triggers this command.
    #[must_use]
    pub const fn binding(self) -> (KeyCode, KeyModifiers) {
        match self {
            Self::Send => (KeyCode::Enter, KeyModifiers::NONE),
            Self::ToggleMinimize => (KeyCode::Char('t'), KeyModifiers::CONTROL),
            Self::ToggleExpand => (KeyCode::Char('e'), KeyModifiers::CONTROL),
            Self::Attach => (KeyCode::Char('o'), KeyModifiers::CONTROL),
            Self::Copy => (KeyCode::Char('y'), KeyModifiers::CONTROL),
            Self::QuickAction(QuickAction::Review) => (KeyCode::F(1), KeyModifiers::NONE),
            Self::QuickAction(QuickAction::Debug) => (KeyCode::F(2), KeyModifiers::NONE),
            Self::QuickAction(QuickAction::Optimize) => (KeyCode::F(3), KeyModifiers::NONE),
            Self::QuickAction(QuickAction::Explain) => (KeyCode::F(4), KeyModifiers::NONE),
        }
    }

    /// Look up the command bound to a key press.
    #[must_use]
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.binding() == (key.code, key.modifiers))
    }
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "send" => Ok(Self::Send),
            "toggle-minimize" => Ok(Self::ToggleMinimize),
            "toggle-expand" => Ok(Self::ToggleExpand),
            "attach" => Ok(Self::Attach),
            "copy" => Ok(Self::Copy),
            _ => match s.strip_prefix("quick-action:") {
                Some(tag) => Ok(Self::QuickAction(tag.parse()?)),
                None => Err(ActionParseError::UnknownCommand(s.to_string())),
            },
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Send => f.write_str("send"),
            Self::ToggleMinimize => f.write_str("toggle-minimize"),
            Self::ToggleExpand => f.write_str("toggle-expand"),
            Self::Attach => f.write_str("attach"),
            Self::Copy => f.write_str("copy"),
            Self::QuickAction(tag) => write!(f, "quick-action:{tag}"),
        }
    }
}
