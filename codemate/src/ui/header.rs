//! Widget title bar: name, pending indicator, and chrome controls.

use ratatui::text::{Line, Span};

use super::theme;
use crate::action::Action;
use crate::app::App;

/// Left side of the title bar.
#[must_use]
pub fn title(app: &App) -> Line<'static> {
    let mut spans = vec![Span::styled(" \u{1f916} Codemate ", theme::highlighted())];
    if app.session_state().is_awaiting_response {
        spans.push(Span::styled("typing\u{2026} ", theme::thinking()));
    }
    Line::from(spans).left_aligned()
}

/// Right side of the title bar: copy feedback and the toggle icons.
#[must_use]
pub fn controls(app: &App) -> Line<'static> {
    let mut spans = Vec::new();
    if app.is_copy_indicator_active() {
        spans.push(Span::styled("\u{2713} Copied ", theme::normal().fg(theme::SUCCESS)));
    }
    spans.push(Span::styled(
        format!("[{}]", app.ui().expand_icon()),
        theme::bold(),
    ));
    spans.push(Span::raw(" "));
    spans.push(Span::styled(
        format!("[{}] ", app.ui().minimize_icon()),
        theme::bold(),
    ));
    Line::from(spans).right_aligned()
}

/// Short label for a key binding, e.g. `^T` or `F2`.
#[must_use]
pub fn key_label(action: Action) -> String {
    use crossterm::event::{KeyCode, KeyModifiers};

    let (code, mods) = action.binding();
    let key = match code {
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::F(n) => format!("F{n}"),
        KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
        other => format!("{other:?}"),
    };
    if mods.contains(KeyModifiers::CONTROL) {
        format!("^{key}")
    } else {
        key
    }
}
