//! Key help line at the bottom of the widget.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{header, theme};
use crate::action::Action;
use crate::app::App;

/// Render the key help for the current mode.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = if app.attach_prompt().is_some() {
        "Enter: attach | Esc: cancel".to_string()
    } else {
        format!(
            "{}: send | Alt+Enter: newline | {}: attach | {}: copy code | {}/{}: min/expand | Esc: quit",
            header::key_label(Action::Send),
            header::key_label(Action::Attach),
            header::key_label(Action::Copy),
            header::key_label(Action::ToggleMinimize),
            header::key_label(Action::ToggleExpand),
        )
    };

    let line = Line::from(vec![Span::styled(help_text, theme::dimmed())]);
    let paragraph = Paragraph::new(line).style(theme::status_bar_bg());
    frame.render_widget(paragraph, area);
}
