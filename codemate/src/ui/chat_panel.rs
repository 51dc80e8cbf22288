//! Chat panel rendering (message list + input box).

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use codemate_proto::format::Segment;
use codemate_proto::message::{Message, Sender};

use super::theme;
use crate::app::App;
use crate::attach::ALLOWED_EXTENSIONS;

/// Shown in place of a pending reply.
pub const THINKING_TEXT: &str = "AI is thinking...";

/// Left indent for message bodies, under the avatar.
const INDENT: &str = "   ";

/// Render the transcript, scrolled so the newest message is visible.
pub fn render_messages(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line<'static>> = app
        .messages()
        .iter()
        .flat_map(|msg| message_lines(app, msg))
        .collect();

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    let scroll = bottom_scroll(&paragraph, area.width, area.height);
    frame.render_widget(paragraph.scroll((scroll, 0)), area);
}

/// Display lines for one message: a header, the body, and a blank spacer.
///
/// User messages are right-aligned, assistant messages left-aligned.
#[must_use]
pub fn message_lines(app: &App, msg: &Message) -> Vec<Line<'static>> {
    let (name, color) = match msg.sender {
        Sender::User => ("You", theme::USER),
        Sender::Assistant => ("Assistant", theme::ASSISTANT),
    };
    let mut lines = vec![Line::from(vec![
        Span::raw(format!("{} ", msg.sender.avatar())),
        Span::styled(name, theme::bold().fg(color)),
        Span::raw("  "),
        Span::styled(app.format_timestamp(msg.created_at), theme::timestamp()),
    ])];

    if msg.is_placeholder {
        lines.push(Line::from(vec![
            Span::raw(INDENT),
            Span::styled(THINKING_TEXT, theme::thinking()),
        ]));
    } else if let Some(formatted) = app.view().get(msg.id) {
        for segments in formatted.lines() {
            push_body_line(&mut lines, &segments);
        }
    } else {
        for raw in msg.text.split('\n') {
            lines.push(Line::from(vec![
                Span::raw(INDENT),
                Span::styled(raw.to_string(), theme::normal()),
            ]));
        }
    }

    if msg.sender == Sender::User {
        lines = lines.into_iter().map(Line::right_aligned).collect();
    }
    lines.push(Line::default());
    lines
}

fn push_body_line(lines: &mut Vec<Line<'static>>, segments: &[&Segment]) {
    let mut spans = vec![Span::raw(INDENT)];
    for segment in segments {
        match segment {
            Segment::Text(s) => spans.push(Span::styled(s.clone(), theme::normal())),
            Segment::Code(s) => spans.push(Span::styled(s.clone(), theme::code())),
            Segment::Strong(s) => spans.push(Span::styled(s.clone(), theme::bold())),
            Segment::Emphasis(s) => spans.push(Span::styled(s.clone(), theme::italic())),
            Segment::CodeBlock { lang, code } => {
                if spans.len() > 1 {
                    lines.push(Line::from(std::mem::replace(&mut spans, vec![Span::raw(INDENT)])));
                }
                if !lang.is_empty() {
                    lines.push(Line::from(vec![
                        Span::raw(INDENT),
                        Span::styled(lang.clone(), theme::dimmed()),
                    ]));
                }
                for code_line in code.split('\n') {
                    lines.push(Line::from(vec![
                        Span::raw(INDENT),
                        Span::styled(format!(" {code_line} "), theme::code_block()),
                    ]));
                }
            }
            Segment::LineBreak => {}
        }
    }
    if spans.len() > 1 || segments.is_empty() {
        lines.push(Line::from(spans));
    }
}

/// Scroll offset that puts the last wrapped row at the bottom of the view.
///
/// Rows are counted by the paragraph's own word wrapping, so `paragraph`
/// must already carry the `Wrap` it is rendered with.
fn bottom_scroll(paragraph: &Paragraph<'_>, width: u16, height: u16) -> u16 {
    let rows = paragraph.line_count(width.max(1));
    u16::try_from(rows.saturating_sub(usize::from(height))).unwrap_or(u16::MAX)
}

/// Render the input box, or the file path prompt while attaching.
pub fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(prompt) = app.attach_prompt() {
        let lines = vec![
            Line::from(vec![
                Span::styled(prompt.text().to_string(), theme::normal()),
                Span::styled("\u{2588}", theme::bold()),
            ]),
            Line::from(Span::styled(
                format!("allowed: {}", ALLOWED_EXTENSIONS.join(", ")),
                theme::dimmed(),
            )),
        ];
        let block = Block::default()
            .title(" Attach file ")
            .borders(Borders::ALL)
            .border_style(theme::highlighted());
        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
            area,
        );
        return;
    }

    let input = app.input();
    let lines: Vec<Line<'static>> = if input.draft().is_empty() {
        vec![Line::from(vec![
            Span::styled("\u{2588}", theme::bold()),
            Span::styled("Ask about your code...", theme::dimmed()),
        ])]
    } else {
        with_cursor(input.draft(), input.cursor())
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), theme::normal())))
            .collect()
    };

    let counter = input.counter();
    let send_hint = if app.can_submit() {
        Span::styled(" Enter \u{21b5} ", theme::highlighted())
    } else {
        Span::styled(" Enter \u{21b5} ", theme::dimmed())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::normal())
        .title_bottom(Line::from(send_hint).left_aligned())
        .title_bottom(
            Line::from(Span::styled(format!(" {counter} "), theme::counter(counter.is_warning())))
                .right_aligned(),
        );

    // Measured before the border is attached, against the inner area.
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    let scroll = bottom_scroll(
        &paragraph,
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    );
    frame.render_widget(paragraph.scroll((scroll, 0)).block(block), area);
}

/// `draft` with a block cursor inserted at char index `cursor`.
fn with_cursor(draft: &str, cursor: usize) -> String {
    let idx = draft
        .char_indices()
        .nth(cursor)
        .map_or(draft.len(), |(i, _)| i);
    let mut out = String::with_capacity(draft.len() + 3);
    out.push_str(&draft[..idx]);
    out.push('\u{2588}');
    out.push_str(&draft[idx..]);
    out
}
