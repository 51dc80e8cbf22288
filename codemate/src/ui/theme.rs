//! Theme and styling constants for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::Gray;

/// Highlight color for borders and titles.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Success color ("copied" indicator).
pub const SUCCESS: Color = Color::Green;

/// Warning color (character counter near the limit).
pub const WARNING: Color = Color::Yellow;

/// Name color for the user.
pub const USER: Color = Color::LightBlue;

/// Name color for the assistant.
pub const ASSISTANT: Color = Color::LightMagenta;

/// Background for inline code and code blocks.
pub const CODE_BG: Color = Color::Rgb(40, 44, 52);

/// Normal text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (metadata, placeholders).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Bold text style.
#[must_use]
pub fn bold() -> Style {
    Style::default().fg(FG_PRIMARY).add_modifier(Modifier::BOLD)
}

/// Italic text style.
#[must_use]
pub fn italic() -> Style {
    Style::default()
        .fg(FG_PRIMARY)
        .add_modifier(Modifier::ITALIC)
}

/// Highlighted style (widget border, titles).
#[must_use]
pub fn highlighted() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

/// Inline code.
#[must_use]
pub fn code() -> Style {
    Style::default().fg(Color::LightYellow).bg(CODE_BG)
}

/// Lines of a fenced code block.
#[must_use]
pub fn code_block() -> Style {
    Style::default().fg(Color::LightGreen).bg(CODE_BG)
}

/// Style for timestamps (dark gray).
#[must_use]
pub fn timestamp() -> Style {
    Style::default().fg(Color::Rgb(120, 120, 120))
}

/// "AI is thinking..." placeholder.
#[must_use]
pub fn thinking() -> Style {
    Style::default()
        .fg(Color::Rgb(100, 140, 180))
        .add_modifier(Modifier::ITALIC)
}

/// Character counter style, yellow once past the warning threshold.
#[must_use]
pub fn counter(warning: bool) -> Style {
    if warning {
        Style::default().fg(WARNING).add_modifier(Modifier::BOLD)
    } else {
        dimmed()
    }
}

/// Style for the status bar background (dark background with white foreground).
#[must_use]
pub fn status_bar_bg() -> Style {
    Style::default().fg(Color::White).bg(Color::Rgb(30, 30, 50))
}

/// Quick-action chip.
#[must_use]
pub fn chip() -> Style {
    Style::default().fg(Color::Black).bg(Color::Rgb(150, 180, 220))
}
