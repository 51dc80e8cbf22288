//! Integration tests for the widget command table.
//!
//! Every control is invoked by name through `dispatch_named`, the same path
//! the key bindings take.
//!
//! These tests validate:
//! - Quick actions fill the draft without sending
//! - Chrome toggles are independent of each other and of the transcript
//! - Copy targets the newest code block and drives the indicator
//! - Attaching a file composes a fenced draft
//! - Unknown names are rejected

use std::path::PathBuf;
use std::time::Duration;

use codemate::action::ActionParseError;
use codemate::app::App;
use codemate::chat::typing::{FixedDelay, ManualClock};
use codemate::clipboard::CopyOutcome;
use codemate::config::ClientConfig;
use codemate::io::{IoCommand, IoEvent};
use codemate_proto::category::Category;
use codemate_proto::quick_action::QuickAction;

fn widget(welcome: bool) -> (App, ManualClock) {
    let clock = ManualClock::new(1_700_000_000_000);
    let config = ClientConfig {
        welcome,
        ..ClientConfig::default()
    };
    let app = App::with_parts(
        &config,
        Box::new(clock.clone()),
        Box::new(FixedDelay(Duration::from_millis(1500))),
    );
    (app, clock)
}

// =============================================================================
// Quick actions
// =============================================================================

#[test]
fn quick_action_debug_then_send() {
    let (mut app, clock) = widget(false);
    assert_eq!(app.dispatch_named("quick-action:debug"), Ok(None));

    let template = QuickAction::Debug.template();
    let state = app.session_state();
    assert_eq!(state.draft_text, template);
    assert_eq!(state.message_count, 0);
    assert_eq!(
        app.input().counter().to_string(),
        format!("{}/2000", template.chars().count())
    );

    app.dispatch_named("send").unwrap();
    clock.advance(Duration::from_millis(1500));
    // The template mentions "code", which outranks "error".
    assert_eq!(app.tick().unwrap().category, Category::Code);
}

#[test]
fn quick_action_replaces_existing_draft() {
    let (mut app, _) = widget(false);
    app.dispatch_named("quick-action:review").unwrap();
    app.dispatch_named("quick-action:explain").unwrap();
    assert_eq!(app.input().draft(), QuickAction::Explain.template());
}

// =============================================================================
// Chrome
// =============================================================================

#[test]
fn toggles_flip_independently() {
    let (mut app, _) = widget(true);
    let before = app.messages().len();

    app.dispatch_named("toggle-minimize").unwrap();
    assert!(app.session_state().is_minimized);
    assert!(!app.session_state().is_expanded);

    app.dispatch_named("toggle-expand").unwrap();
    assert!(app.session_state().is_expanded);

    app.dispatch_named("toggle-minimize").unwrap();
    let state = app.session_state();
    assert!(!state.is_minimized);
    assert!(state.is_expanded);
    assert_eq!(app.messages().len(), before);
}

// =============================================================================
// Copy
// =============================================================================

#[test]
fn copy_sends_newest_snippet() {
    let (mut app, _) = widget(true);
    let Ok(Some(IoCommand::Copy(text))) = app.dispatch_named("copy") else {
        panic!("expected a copy command");
    };
    assert!(text.contains("clearTimeout(timer);"));
    assert!(!text.contains("```"));
}

#[test]
fn attached_snippet_becomes_copy_target_once_sent() {
    let (mut app, _) = widget(true);
    app.apply_io_event(IoEvent::AttachmentLoaded {
        file_name: "main.c".into(),
        content: "int main(void) { return 0; }".into(),
    });
    // Still a draft; the welcome snippet is the target.
    assert!(app.copy_target().unwrap().contains("debounce"));

    assert!(app.submit());
    assert_eq!(app.copy_target().as_deref(), Some("int main(void) { return 0; }"));
}

#[test]
fn copy_feedback_lasts_two_seconds() {
    let (mut app, clock) = widget(true);
    app.apply_io_event(IoEvent::CopyFinished(CopyOutcome::Primary));
    assert!(app.is_copy_indicator_active());

    clock.advance(Duration::from_millis(1000));
    app.tick();
    assert!(app.is_copy_indicator_active());

    clock.advance(Duration::from_millis(1000));
    app.tick();
    assert!(!app.is_copy_indicator_active());
}

// =============================================================================
// Attach
// =============================================================================

#[test]
fn attach_python_file_composes_draft() {
    let (mut app, _) = widget(false);
    assert_eq!(app.dispatch_named("attach"), Ok(None));
    assert!(app.attach_prompt().is_some());

    let cmd = app.pick_attachment(Some(PathBuf::from("test.py")));
    assert_eq!(cmd, Some(IoCommand::ReadAttachment(PathBuf::from("test.py"))));

    app.apply_io_event(IoEvent::AttachmentLoaded {
        file_name: "test.py".into(),
        content: "print(1)".into(),
    });
    assert_eq!(
        app.input().draft(),
        "I've attached a PY file (test.py). Can you review it?\n\n```py\nprint(1)\n```"
    );
    assert!(app.messages().is_empty());
}

#[test]
fn cancelled_picker_changes_nothing() {
    let (mut app, _) = widget(false);
    app.dispatch_named("quick-action:review").unwrap();
    app.dispatch_named("attach").unwrap();
    assert_eq!(app.pick_attachment(None), None);
    assert!(app.attach_prompt().is_none());
    assert_eq!(app.input().draft(), QuickAction::Review.template());
}

// =============================================================================
// Command names
// =============================================================================

#[test]
fn unknown_names_are_rejected() {
    let (mut app, _) = widget(false);
    assert_eq!(
        app.dispatch_named("explode"),
        Err(ActionParseError::UnknownCommand("explode".into()))
    );
    assert!(matches!(
        app.dispatch_named("quick-action:dance"),
        Err(ActionParseError::UnknownQuickAction(_))
    ));
}
