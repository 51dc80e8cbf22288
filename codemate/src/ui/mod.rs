//! Terminal UI rendering.
//!
//! The widget docks to the right edge of the terminal. Expanded, it takes
//! the whole frame; minimized, it shrinks to its header bar in the
//! bottom-right corner.

pub mod chat_panel;
pub mod header;
pub mod quick_bar;
pub mod status_bar;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear},
};

use crate::app::App;
use crate::chrome::UiState;

/// Narrowest the docked widget gets, in columns.
const MIN_DOCK_WIDTH: u16 = 48;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = widget_area(frame.area(), app.ui());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::highlighted())
        .title(header::title(app))
        .title(header::controls(app));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.ui().is_minimized() {
        return;
    }

    let chunks = body_layout(inner, app.input().visible_rows());
    chat_panel::render_messages(frame, chunks[0], app);
    quick_bar::render(frame, chunks[1]);
    chat_panel::render_input(frame, chunks[2], app);
    status_bar::render(frame, chunks[3], app);
}

/// Where the widget sits within the terminal.
#[must_use]
pub fn widget_area(screen: Rect, ui: &UiState) -> Rect {
    let docked_width = (screen.width * 2 / 5).max(MIN_DOCK_WIDTH).min(screen.width);
    let x = screen.x + screen.width - docked_width;

    if ui.is_minimized() {
        let height = 3.min(screen.height);
        return Rect::new(x, screen.y + screen.height - height, docked_width, height);
    }
    if ui.is_expanded() {
        return screen;
    }
    Rect::new(x, screen.y, docked_width, screen.height)
}

/// Width the draft wraps at for a given terminal size.
#[must_use]
pub fn input_wrap_width(screen: Rect, ui: &UiState) -> u16 {
    // Outer border plus the input box border.
    widget_area(screen, ui).width.saturating_sub(4)
}

fn body_layout(inner: Rect, input_rows: u16) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),                  // Messages
            Constraint::Length(1),               // Quick actions
            Constraint::Length(input_rows + 2), // Input
            Constraint::Length(1),               // Key help
        ])
        .split(inner)
}
