//! Integration tests for the background I/O worker wired to the widget.
//!
//! These tests validate:
//! - A picked file round-trips through the worker into the draft
//! - Reading from disk works for real files
//! - A failed primary clipboard is handed back and copied via the terminal
//! - Shutdown stops the worker

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use codemate::app::App;
use codemate::attach::{DiskFiles, MemoryFiles};
use codemate::chat::typing::{FixedDelay, ManualClock};
use codemate::clipboard::{ClipboardBackend, ClipboardError, CopyOutcome, osc52_sequence};
use codemate::config::ClientConfig;
use codemate::io::{IoCommand, IoEvent, complete_on_terminal, spawn_io};

/// Clipboard that records writes or refuses them all.
struct Recording {
    fail: bool,
    writes: Arc<Mutex<Vec<String>>>,
}

impl ClipboardBackend for Recording {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::Unavailable("headless".into()));
        }
        self.writes.lock().push(text.to_string());
        Ok(())
    }
}

fn bridge(fail: bool) -> (Box<dyn ClipboardBackend>, Arc<Mutex<Vec<String>>>) {
    let writes = Arc::new(Mutex::new(Vec::new()));
    let clipboard = Box::new(Recording {
        fail,
        writes: Arc::clone(&writes),
    });
    (clipboard, writes)
}

fn widget(welcome: bool) -> App {
    let config = ClientConfig {
        welcome,
        ..ClientConfig::default()
    };
    App::with_parts(
        &config,
        Box::new(ManualClock::new(0)),
        Box::new(FixedDelay(Duration::from_millis(1500))),
    )
}

async fn next_event(rx: &mut tokio::sync::mpsc::Receiver<IoEvent>) -> IoEvent {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for io event")
        .expect("io worker stopped")
}

#[tokio::test]
async fn picked_file_becomes_fenced_draft() {
    let files = MemoryFiles::new();
    files.insert("test.py", "print(1)");
    let (clipboard, _) = bridge(false);
    let (tx, mut rx) = spawn_io(files, clipboard, 4);

    let mut app = widget(false);
    let cmd = app.pick_attachment(Some(PathBuf::from("test.py"))).unwrap();
    tx.send(cmd).await.unwrap();
    app.apply_io_event(next_event(&mut rx).await);

    let draft = app.input().draft();
    assert!(draft.starts_with("I've attached a PY file (test.py)."));
    assert!(draft.contains("```py\nprint(1)\n```"));
}

#[tokio::test]
async fn reads_real_files_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("widget.tsx");
    std::fs::write(&path, "export const A = () => null;").unwrap();

    let (clipboard, _) = bridge(false);
    let (tx, mut rx) = spawn_io(DiskFiles, clipboard, 4);
    tx.send(IoCommand::ReadAttachment(path)).await.unwrap();

    assert_eq!(
        next_event(&mut rx).await,
        IoEvent::AttachmentLoaded {
            file_name: "widget.tsx".into(),
            content: "export const A = () => null;".into(),
        }
    );
}

#[tokio::test]
async fn unreadable_file_leaves_draft_alone() {
    let (clipboard, _) = bridge(false);
    let (tx, mut rx) = spawn_io(MemoryFiles::new(), clipboard, 4);

    let mut app = widget(false);
    tx.send(IoCommand::ReadAttachment(PathBuf::from("missing.js")))
        .await
        .unwrap();
    app.apply_io_event(next_event(&mut rx).await);
    assert!(app.input().draft().is_empty());
}

#[tokio::test]
async fn copy_uses_system_clipboard_when_available() {
    let (clipboard, writes) = bridge(false);
    let (tx, mut rx) = spawn_io(MemoryFiles::new(), clipboard, 4);

    let mut app = widget(true);
    let cmd = app.dispatch_named("copy").unwrap().unwrap();
    tx.send(cmd).await.unwrap();

    let mut terminal = Vec::new();
    let event = complete_on_terminal(next_event(&mut rx).await, &mut terminal);
    assert_eq!(event, IoEvent::CopyFinished(CopyOutcome::Primary));
    app.apply_io_event(event);

    assert!(app.is_copy_indicator_active());
    assert!(terminal.is_empty());
    assert!(writes.lock()[0].starts_with("function debounce"));
}

#[tokio::test]
async fn refused_copy_is_written_by_the_drawing_thread() {
    let (clipboard, writes) = bridge(true);
    let (tx, mut rx) = spawn_io(MemoryFiles::new(), clipboard, 4);

    let mut app = widget(true);
    let cmd = app.dispatch_named("copy").unwrap().unwrap();
    tx.send(cmd).await.unwrap();

    // The worker must not touch the terminal itself.
    let event = next_event(&mut rx).await;
    let IoEvent::CopyFallback(text) = &event else {
        panic!("expected a fallback request, got {event:?}");
    };
    assert!(text.starts_with("function debounce"));
    let expected = osc52_sequence(text).into_bytes();

    // Applying the raw request alone changes nothing.
    app.apply_io_event(event.clone());
    assert!(!app.is_copy_indicator_active());

    let mut terminal = Vec::new();
    let event = complete_on_terminal(event, &mut terminal);
    assert_eq!(event, IoEvent::CopyFinished(CopyOutcome::Fallback));
    assert_eq!(terminal, expected);
    app.apply_io_event(event);

    assert!(app.is_copy_indicator_active());
    assert!(writes.lock().is_empty());
}

#[tokio::test]
async fn shutdown_stops_worker() {
    let (clipboard, _) = bridge(false);
    let (tx, mut rx) = spawn_io(MemoryFiles::new(), clipboard, 4);
    tx.send(IoCommand::Shutdown).await.unwrap();
    assert!(rx.recv().await.is_none());
}
