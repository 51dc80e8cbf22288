//! Widget state and event handling.
//!
//! [`App`] is one instance of the assistant widget. It owns the transcript,
//! the draft, the typing simulation and the chrome flags, and routes every
//! control through [`App::dispatch`]. Work that may block (reading a picked
//! file, writing the clipboard) is returned to the caller as an
//! [`IoCommand`]; its result comes back through [`App::apply_io_event`].

use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use codemate_proto::message::{Message, MessageId, Sender, SessionId, Timestamp};

use crate::action::{Action, ActionParseError};
use crate::attach::{self, PathPrompt};
use crate::chat::store::MessageStore;
use crate::chat::transcript::TranscriptView;
use crate::chat::typing::{
    Clock, DelaySource, Resolution, SystemClock, TypingSimulator, UniformDelay,
};
use crate::chrome::UiState;
use crate::clipboard::CopyIndicator;
use crate::config::ClientConfig;
use crate::input::InputController;
use crate::io::{IoCommand, IoEvent};

/// Greeting shown when the widget opens.
pub const WELCOME_MESSAGE: &str = "Hi! I'm your coding assistant. Ask me to **review**, **debug**, \
    **optimize** or **explain** code, or attach a file with `Ctrl+O`.\n\
    \n\
    Here's a snippet you can copy with `Ctrl+Y`:\n\
    ```js\n\
    function debounce(fn, wait) {\n  let timer;\n  return (...args) => {\n    clearTimeout(timer);\n    timer = setTimeout(() => fn(...args), wait);\n  };\n}\n\
    ```";

/// Snapshot of the widget's session flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Widget collapsed to its header.
    pub is_minimized: bool,
    /// Widget filling the screen.
    pub is_expanded: bool,
    /// A reply is pending.
    pub is_awaiting_response: bool,
    /// Regular messages in the transcript.
    pub message_count: usize,
    /// Current draft.
    pub draft_text: String,
}

/// One assistant widget.
pub struct App {
    session: SessionId,
    clock: Box<dyn Clock>,
    store: MessageStore,
    view: TranscriptView,
    typing: TypingSimulator,
    input: InputController,
    ui: UiState,
    copy_indicator: CopyIndicator,
    copy_feedback: Duration,
    attach_prompt: Option<PathPrompt>,
    timestamp_format: String,
    torn_down: bool,
    /// Whether the host should exit.
    pub should_quit: bool,
}

impl App {
    /// Create a widget on the real clock with a uniformly random reply delay.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_parts(
            config,
            Box::new(SystemClock),
            Box::new(UniformDelay::new(
                config.reply_delay_min,
                config.reply_delay_max,
            )),
        )
    }

    /// Create a widget with an injected clock and delay source.
    #[must_use]
    pub fn with_parts(
        config: &ClientConfig,
        clock: Box<dyn Clock>,
        delay: Box<dyn DelaySource>,
    ) -> Self {
        let mut app = Self {
            session: SessionId::new(),
            clock,
            store: MessageStore::new(),
            view: TranscriptView::new(),
            typing: TypingSimulator::new(delay),
            input: InputController::new(config.input_max_height_units),
            ui: UiState::new(),
            copy_indicator: CopyIndicator::default(),
            copy_feedback: config.copy_feedback,
            attach_prompt: None,
            timestamp_format: config.timestamp_format.clone(),
            torn_down: false,
            should_quit: false,
        };

        if config.welcome {
            let at = app.clock.wall_time();
            app.store.append(Sender::Assistant, WELCOME_MESSAGE, at);
            app.view.sync(&app.store);
        }

        tracing::info!(session = %app.session, "widget created");
        app
    }

    // -----------------------------------------------------------------------
    // Command table
    // -----------------------------------------------------------------------

    /// Run a widget command.
    ///
    /// Returns an [`IoCommand`] when the command needs background I/O.
    pub fn dispatch(&mut self, action: Action) -> Option<IoCommand> {
        tracing::debug!(session = %self.session, %action, "dispatch");
        match action {
            Action::Send => {
                self.submit();
                None
            }
            Action::ToggleMinimize => {
                let minimized = self.ui.toggle_minimized();
                tracing::debug!(session = %self.session, minimized, "toggled minimize");
                None
            }
            Action::ToggleExpand => {
                let expanded = self.ui.toggle_expanded();
                tracing::debug!(session = %self.session, expanded, "toggled expand");
                None
            }
            Action::Attach => {
                self.attach_prompt = Some(PathPrompt::new());
                None
            }
            Action::Copy => self.copy_target().map(IoCommand::Copy),
            Action::QuickAction(tag) => {
                self.input.set_draft(tag.template());
                None
            }
        }
    }

    /// Run a widget command by name, e.g. `"quick-action:debug"`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionParseError`] if the name is not in the command table.
    pub fn dispatch_named(&mut self, name: &str) -> Result<Option<IoCommand>, ActionParseError> {
        let action = name.parse::<Action>()?;
        Ok(self.dispatch(action))
    }

    // -----------------------------------------------------------------------
    // Message lifecycle
    // -----------------------------------------------------------------------

    /// Whether the send control is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.torn_down && self.input.has_text() && !self.typing.is_awaiting()
    }

    /// Submit the draft. Returns `false` (and changes nothing) when the
    /// send control is disabled.
    pub fn submit(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }
        let Some(text) = self.input.take_submission() else {
            return false;
        };

        let now = self.clock.now();
        let at = self.clock.wall_time();
        match self.typing.submit(&mut self.store, &text, now, at) {
            Ok(sub) => {
                tracing::info!(
                    session = %self.session,
                    message = %sub.user_message,
                    delay_ms = sub.delay.as_millis(),
                    "submitted"
                );
                self.view.sync(&self.store);
                true
            }
            Err(e) => {
                tracing::warn!(session = %self.session, "submit refused: {e}");
                self.input.set_draft(text);
                false
            }
        }
    }

    /// Advance timers: resolve a due reply and expire the copy indicator.
    ///
    /// Returns the resolution if a reply was appended.
    pub fn tick(&mut self) -> Option<Resolution> {
        let now = self.clock.now();
        if self.copy_indicator.tick(now) {
            tracing::trace!(session = %self.session, "copy indicator reverted");
        }

        let resolution = self
            .typing
            .poll(&mut self.store, now, self.clock.wall_time())?;
        tracing::info!(
            session = %self.session,
            category = %resolution.category,
            message = %resolution.reply,
            "reply resolved"
        );
        self.view.sync(&self.store);
        Some(resolution)
    }

    /// Tear the widget down, discarding any pending reply.
    ///
    /// The placeholder is removed so no observer sees a reply that will
    /// never arrive. Later submissions are refused.
    pub fn teardown(&mut self) {
        if self.typing.cancel(&mut self.store) {
            tracing::info!(session = %self.session, "pending reply cancelled on teardown");
            self.view.sync(&self.store);
        }
        self.torn_down = true;
    }

    // -----------------------------------------------------------------------
    // Attachments and clipboard
    // -----------------------------------------------------------------------

    /// Handle the picker result. `None` means the picker was cancelled.
    pub fn pick_attachment(&mut self, path: Option<PathBuf>) -> Option<IoCommand> {
        self.attach_prompt = None;
        let path = path?;
        if !attach::is_allowed(&path) {
            tracing::debug!(session = %self.session, path = %path.display(), "attachment not allowed");
            return None;
        }
        tracing::info!(session = %self.session, path = %path.display(), "reading attachment");
        Some(IoCommand::ReadAttachment(path))
    }

    /// Apply the result of background I/O.
    pub fn apply_io_event(&mut self, event: IoEvent) {
        match event {
            IoEvent::AttachmentLoaded { file_name, content } => {
                tracing::info!(session = %self.session, file = %file_name, "attachment loaded");
                self.input
                    .set_draft(attach::compose_draft(&file_name, &content));
            }
            IoEvent::AttachmentFailed { path, .. } => {
                tracing::debug!(session = %self.session, path = %path.display(), "attachment ignored");
            }
            IoEvent::CopyFallback(_) => {
                // Only the drawing loop may write the terminal fallback.
                tracing::debug!(session = %self.session, "fallback copy not completed");
            }
            IoEvent::CopyFinished(outcome) => {
                if outcome.is_copied() {
                    self.copy_indicator
                        .show(self.clock.now(), self.copy_feedback);
                }
            }
        }
    }

    /// Text the copy control would copy: the newest fenced code block.
    #[must_use]
    pub fn copy_target(&self) -> Option<String> {
        self.store
            .messages()
            .iter()
            .rev()
            .filter_map(|m| self.view.get(m.id))
            .find_map(|f| f.last_code_block())
            .map(str::to_string)
    }

    // -----------------------------------------------------------------------
    // Key handling
    // -----------------------------------------------------------------------

    /// Handle a key event.
    ///
    /// Returns an [`IoCommand`] when the key triggered background I/O.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<IoCommand> {
        if self.attach_prompt.is_some() {
            return self.handle_prompt_key(key);
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                self.should_quit = true;
                return None;
            }
            (KeyCode::Enter, m) if m.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) => {
                self.input.insert_char('\n');
                return None;
            }
            _ => {}
        }

        if let Some(action) = Action::from_key(key) {
            return self.dispatch(action);
        }

        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.insert_char(c);
            }
            KeyCode::Backspace => self.input.delete_char(),
            KeyCode::Left => self.input.move_cursor_left(),
            KeyCode::Right => self.input.move_cursor_right(),
            KeyCode::Home => self.input.move_cursor_home(),
            KeyCode::End => self.input.move_cursor_end(),
            _ => {}
        }
        None
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) -> Option<IoCommand> {
        let prompt = self.attach_prompt.as_mut()?;
        match key.code {
            KeyCode::Esc => self.pick_attachment(None),
            KeyCode::Enter => {
                let picked = prompt.pick();
                self.pick_attachment(picked)
            }
            KeyCode::Backspace => {
                prompt.pop();
                None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                prompt.push(c);
                None
            }
            _ => None,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Snapshot of the session flags.
    #[must_use]
    pub fn session_state(&self) -> SessionState {
        SessionState {
            is_minimized: self.ui.is_minimized(),
            is_expanded: self.ui.is_expanded(),
            is_awaiting_response: self.typing.is_awaiting(),
            message_count: self.store.message_count(),
            draft_text: self.input.draft().to_string(),
        }
    }

    /// This widget's session id.
    #[must_use]
    pub const fn session_id(&self) -> SessionId {
        self.session
    }

    /// Transcript messages in order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        self.store.messages()
    }

    /// The transcript store.
    #[must_use]
    pub const fn store(&self) -> &MessageStore {
        &self.store
    }

    /// Formatted message bodies.
    #[must_use]
    pub const fn view(&self) -> &TranscriptView {
        &self.view
    }

    /// The draft input.
    #[must_use]
    pub const fn input(&self) -> &InputController {
        &self.input
    }

    /// Chrome flags.
    #[must_use]
    pub const fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Whether the "copied" indicator is showing.
    #[must_use]
    pub const fn is_copy_indicator_active(&self) -> bool {
        self.copy_indicator.is_active()
    }

    /// The open file picker prompt, if any.
    #[must_use]
    pub const fn attach_prompt(&self) -> Option<&PathPrompt> {
        self.attach_prompt.as_ref()
    }

    /// Whether the widget has been torn down.
    #[must_use]
    pub const fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Id of the pending placeholder, if any.
    #[must_use]
    pub fn placeholder_id(&self) -> Option<MessageId> {
        self.store.placeholder().map(|m| m.id)
    }

    /// Tell the input how wide it is rendered, so it can fit its height.
    pub fn set_input_width(&mut self, width: u16) {
        self.input.set_wrap_width(width);
    }

    /// Format a message timestamp for display.
    #[must_use]
    pub fn format_timestamp(&self, ts: Timestamp) -> String {
        use chrono::{Local, TimeZone};
        let ms = ts.as_millis();
        let secs = i64::try_from(ms / 1000).unwrap_or(i64::MAX);
        let nsecs = u32::try_from((ms % 1000) * 1_000_000).unwrap_or(0);
        match Local.timestamp_opt(secs, nsecs) {
            chrono::LocalResult::Single(dt) => dt.format(&self.timestamp_format).to_string(),
            _ => "??:??".to_string(),
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("session", &self.session)
            .field("state", &self.session_state())
            .finish_non_exhaustive()
    }
}
