//! Quick-action chips under the transcript.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use codemate_proto::quick_action::QuickAction;

use super::{header, theme};
use crate::action::Action;

/// Render one chip per quick action with its key.
pub fn render(frame: &mut Frame, area: Rect) {
    let mut spans = Vec::with_capacity(QuickAction::ALL.len() * 3);
    for tag in QuickAction::ALL {
        spans.push(Span::styled(
            header::key_label(Action::QuickAction(tag)),
            theme::dimmed(),
        ));
        spans.push(Span::styled(format!(" {} ", tag.label()), theme::chip()));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
