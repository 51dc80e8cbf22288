//! Draft input box: editing, the character counter, and auto-height.
//!
//! The 2000-character limit is advisory. Going past 90% of it turns the
//! counter into a warning, but nothing is rejected or truncated.

/// Advisory character limit shown in the counter.
pub const MAX_CHARS: usize = 2000;

/// Counter switches to warning above this share of [`MAX_CHARS`], in percent.
const WARN_PERCENT: usize = 90;

/// Layout units per text row.
pub const LINE_UNITS: u16 = 20;

/// Input never shrinks below one row.
pub const MIN_HEIGHT_UNITS: u16 = LINE_UNITS;

/// Default cap on the input height.
pub const DEFAULT_MAX_HEIGHT_UNITS: u16 = 120;

/// Snapshot of the character counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharCounter {
    /// Characters in the draft.
    pub len: usize,
    /// The advisory limit.
    pub max: usize,
}

impl CharCounter {
    /// Whether the counter should be shown in its warning state.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        self.len * 100 > self.max * WARN_PERCENT
    }
}

impl std::fmt::Display for CharCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.len, self.max)
    }
}

/// Owns the draft text and everything derived from it.
#[derive(Debug, Clone)]
pub struct InputController {
    draft: String,
    /// Cursor position as a character index.
    cursor: usize,
    counter: CharCounter,
    height_units: u16,
    max_height_units: u16,
    wrap_width: u16,
}

impl InputController {
    /// Create an empty input with the given height cap.
    #[must_use]
    pub fn new(max_height_units: u16) -> Self {
        let mut input = Self {
            draft: String::new(),
            cursor: 0,
            counter: CharCounter {
                len: 0,
                max: MAX_CHARS,
            },
            height_units: MIN_HEIGHT_UNITS,
            max_height_units: max_height_units.max(MIN_HEIGHT_UNITS),
            wrap_width: 80,
        };
        input.on_draft_changed();
        input
    }

    /// The current draft.
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Cursor position as a character index.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// The character counter.
    #[must_use]
    pub const fn counter(&self) -> CharCounter {
        self.counter
    }

    /// Whether the draft holds anything besides whitespace.
    #[must_use]
    pub fn has_text(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    /// Current height in layout units.
    #[must_use]
    pub const fn height_units(&self) -> u16 {
        self.height_units
    }

    /// Current height in text rows.
    #[must_use]
    pub const fn visible_rows(&self) -> u16 {
        self.height_units / LINE_UNITS
    }

    /// Replace the whole draft and put the cursor at the end.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
        self.cursor = self.draft.chars().count();
        self.on_draft_changed();
    }

    /// Empty the draft.
    pub fn clear(&mut self) {
        self.set_draft(String::new());
    }

    /// Take the trimmed draft for submission, clearing the input.
    ///
    /// Returns `None` (and leaves the draft alone) if it is blank.
    pub fn take_submission(&mut self) -> Option<String> {
        if !self.has_text() {
            return None;
        }
        let text = self.draft.trim().to_string();
        self.clear();
        Some(text)
    }

    /// Insert a character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.draft.insert(idx, c);
        self.cursor += 1;
        self.on_draft_changed();
    }

    /// Delete the character before the cursor.
    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let idx = self.byte_index(self.cursor - 1);
        self.draft.remove(idx);
        self.cursor -= 1;
        self.on_draft_changed();
    }

    /// Move cursor left.
    pub const fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.counter.len {
            self.cursor += 1;
        }
    }

    /// Move cursor to the start of the draft.
    pub const fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to the end of the draft.
    pub const fn move_cursor_end(&mut self) {
        self.cursor = self.counter.len;
    }

    /// Set the width the draft wraps at, and re-fit the height.
    pub fn set_wrap_width(&mut self, width: u16) {
        if self.wrap_width != width {
            self.wrap_width = width;
            self.resize_to_content();
        }
    }

    /// Fit the height to the wrapped draft, between one row and the cap.
    pub fn resize_to_content(&mut self) -> u16 {
        let width = usize::from(self.wrap_width.max(1));
        let rows: usize = self
            .draft
            .split('\n')
            .map(|line| line.chars().count().div_ceil(width).max(1))
            .sum();
        let wanted = u16::try_from(rows)
            .unwrap_or(u16::MAX)
            .saturating_mul(LINE_UNITS);
        self.height_units = wanted.clamp(MIN_HEIGHT_UNITS, self.max_height_units);
        self.height_units
    }

    fn on_draft_changed(&mut self) {
        self.counter.len = self.draft.chars().count();
        self.resize_to_content();
        tracing::trace!(len = self.counter.len, warning = self.counter.is_warning(), "draft changed");
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.draft
            .char_indices()
            .nth(char_idx)
            .map_or(self.draft.len(), |(i, _)| i)
    }
}

impl Default for InputController {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HEIGHT_UNITS)
    }
}
