//! Copying code snippets to the clipboard.
//!
//! The system clipboard is tried first, off the UI thread. If it fails, the
//! text is copied with an OSC 52 escape sequence instead, written by the
//! thread that owns the terminal so it never interleaves with a frame. A
//! copy never fails loudly: if both paths fail the outcome is
//! [`CopyOutcome::Failed`] and the "copied" indicator simply stays off.

use std::io::Write;
use std::time::{Duration, Instant};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use crossterm::{execute, style::Print};

/// Errors from a clipboard backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    /// The backend could not be opened.
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// The backend refused the write.
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
}

/// A place text can be copied to.
pub trait ClipboardBackend: Send {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Replace the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError`] if the write did not happen.
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The operating system clipboard.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardBackend for SystemClipboard {
    fn name(&self) -> &'static str {
        "system"
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::Rejected(e.to_string()))
    }
}

/// Build the OSC 52 "set clipboard" sequence for `text`.
#[must_use]
pub fn osc52_sequence(text: &str) -> String {
    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}

/// Copy `text` through the terminal with OSC 52.
///
/// `out` must be the terminal writer, used from the thread that draws.
pub fn copy_fallback<W: Write>(out: &mut W, text: &str) -> CopyOutcome {
    match execute!(out, Print(osc52_sequence(text))) {
        Ok(()) => {
            tracing::debug!(backend = "osc52", len = text.len(), "copied");
            CopyOutcome::Fallback
        }
        Err(e) => {
            tracing::warn!(backend = "osc52", "fallback copy failed: {e}");
            CopyOutcome::Failed
        }
    }
}

/// Which path a copy took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The primary backend accepted the text.
    Primary,
    /// The primary failed and the fallback accepted the text.
    Fallback,
    /// Neither backend accepted the text.
    Failed,
}

impl CopyOutcome {
    /// Whether the text reached a clipboard.
    #[must_use]
    pub const fn is_copied(self) -> bool {
        !matches!(self, Self::Failed)
    }
}

/// Transient "copied" state that reverts after a fixed time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyIndicator {
    until: Option<Instant>,
}

impl CopyIndicator {
    /// Show the indicator from `now` for `duration`.
    pub fn show(&mut self, now: Instant, duration: Duration) {
        self.until = Some(now + duration);
    }

    /// Revert once the deadline has passed. Returns whether it reverted.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.until {
            Some(until) if now >= until => {
                self.until = None;
                true
            }
            _ => false,
        }
    }

    /// Whether the indicator is showing.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.until.is_some()
    }
}
