//! Widget chrome: the minimize and expand toggles.
//!
//! The two flags are independent. Neither blocks the other, and neither is
//! affected by a pending reply.

/// Presentation flags of the widget frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    minimized: bool,
    expanded: bool,
}

impl UiState {
    /// Both flags off.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            minimized: false,
            expanded: false,
        }
    }

    /// Flip the minimized flag and return the new value.
    pub const fn toggle_minimized(&mut self) -> bool {
        self.minimized = !self.minimized;
        self.minimized
    }

    /// Flip the expanded flag and return the new value.
    pub const fn toggle_expanded(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }

    /// Whether the widget is collapsed to its header.
    #[must_use]
    pub const fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// Whether the widget fills the whole screen.
    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Glyph on the minimize control: `+` restores, `−` minimizes.
    #[must_use]
    pub const fn minimize_icon(&self) -> &'static str {
        if self.minimized { "+" } else { "\u{2212}" }
    }

    /// Glyph on the expand control: compress when expanded, expand otherwise.
    #[must_use]
    pub const fn expand_icon(&self) -> &'static str {
        if self.expanded { "\u{2921}" } else { "\u{2922}" }
    }
}
