//! Background I/O for the widget: file reads and clipboard writes.
//!
//! The widget itself is synchronous and driven by the TUI loop. Anything
//! that may block is handed to a tokio task through [`IoCommand`]s, and the
//! results come back as [`IoEvent`]s that the loop drains every tick.
//!
//! The worker never writes to the terminal. When the system clipboard
//! refuses a copy it returns [`IoEvent::CopyFallback`], and the loop
//! finishes the copy itself with [`complete_on_terminal`].
//!
//! ```text
//! TUI (main thread)  ←── IoEvent ───  tokio background task
//!                     ─── IoCommand →
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::attach::FileSource;
use crate::clipboard::{self, ClipboardBackend, CopyOutcome};

/// Default channel capacity for commands and events.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// Work requested by the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoCommand {
    /// Read a picked file for attachment.
    ReadAttachment(PathBuf),
    /// Copy text to the clipboard.
    Copy(String),
    /// Stop the worker.
    Shutdown,
}

/// Results delivered back to the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoEvent {
    /// A picked file was read.
    AttachmentLoaded {
        /// File name without directories.
        file_name: String,
        /// File contents.
        content: String,
    },
    /// A picked file could not be read.
    AttachmentFailed {
        /// The path that was attempted.
        path: PathBuf,
        /// Why it failed.
        reason: String,
    },
    /// The system clipboard refused the text; the terminal should copy it.
    CopyFallback(String),
    /// A clipboard copy finished.
    CopyFinished(CopyOutcome),
}

/// Spawn the I/O worker and return its channel handles.
///
/// Must be called from within a tokio runtime.
pub fn spawn_io<F>(
    files: F,
    clipboard: Box<dyn ClipboardBackend>,
    capacity: usize,
) -> (mpsc::Sender<IoCommand>, mpsc::Receiver<IoEvent>)
where
    F: FileSource + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<IoCommand>(capacity);
    let (evt_tx, evt_rx) = mpsc::channel::<IoEvent>(capacity);

    tokio::spawn(async move {
        command_handler(files, Arc::new(Mutex::new(clipboard)), cmd_rx, evt_tx).await;
    });

    (cmd_tx, evt_rx)
}

async fn command_handler<F: FileSource>(
    files: F,
    clipboard: Arc<Mutex<Box<dyn ClipboardBackend>>>,
    mut cmd_rx: mpsc::Receiver<IoCommand>,
    evt_tx: mpsc::Sender<IoEvent>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        let event = match cmd {
            IoCommand::ReadAttachment(path) => read_attachment(&files, path).await,
            IoCommand::Copy(text) => copy_primary(Arc::clone(&clipboard), text).await,
            IoCommand::Shutdown => {
                tracing::info!("io worker shutting down");
                break;
            }
        };

        if evt_tx.send(event).await.is_err() {
            // Widget dropped; exit.
            break;
        }
    }
}

async fn copy_primary(clipboard: Arc<Mutex<Box<dyn ClipboardBackend>>>, text: String) -> IoEvent {
    // Clipboard backends may block on the display server.
    let result = tokio::task::spawn_blocking(move || {
        let mut backend = clipboard.lock();
        let result = backend.set_text(&text);
        (backend.name(), result, text)
    })
    .await;

    match result {
        Ok((name, Ok(()), text)) => {
            tracing::debug!(backend = name, len = text.len(), "copied");
            IoEvent::CopyFinished(CopyOutcome::Primary)
        }
        Ok((name, Err(e), text)) => {
            tracing::warn!(backend = name, "primary copy failed: {e}");
            IoEvent::CopyFallback(text)
        }
        Err(e) => {
            tracing::warn!("clipboard task failed: {e}");
            IoEvent::CopyFinished(CopyOutcome::Failed)
        }
    }
}

/// Finish a [`IoEvent::CopyFallback`] by writing OSC 52 to `terminal`.
///
/// Call from the thread that draws, between frames. Other events pass
/// through unchanged.
pub fn complete_on_terminal<W: Write>(event: IoEvent, terminal: &mut W) -> IoEvent {
    match event {
        IoEvent::CopyFallback(text) => {
            IoEvent::CopyFinished(clipboard::copy_fallback(terminal, &text))
        }
        other => other,
    }
}

async fn read_attachment<F: FileSource>(files: &F, path: PathBuf) -> IoEvent {
    match files.read_text(&path).await {
        Ok(content) => {
            let file_name = path
                .file_name()
                .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
            IoEvent::AttachmentLoaded { file_name, content }
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "attachment read failed: {e}");
            IoEvent::AttachmentFailed {
                path,
                reason: e.to_string(),
            }
        }
    }
}
