//! Integration tests for the conversation lifecycle.
//!
//! Drives an [`App`] with a manual clock and a fixed reply delay through
//! whole exchanges.
//!
//! These tests validate:
//! - A submitted message is followed by exactly one placeholder, then a reply
//! - Replies are chosen by keyword priority
//! - Submitting is refused while a reply is pending
//! - Formatting runs once per message
//! - Teardown discards a pending reply

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use codemate::app::App;
use codemate::chat::dispatch;
use codemate::chat::typing::{FixedDelay, ManualClock};
use codemate::config::ClientConfig;
use codemate_proto::category::Category;
use codemate_proto::message::Sender;

const DELAY: Duration = Duration::from_millis(2000);

fn widget() -> (App, ManualClock) {
    let clock = ManualClock::new(1_700_000_000_000);
    let config = ClientConfig {
        welcome: false,
        ..ClientConfig::default()
    };
    let app = App::with_parts(&config, Box::new(clock.clone()), Box::new(FixedDelay(DELAY)));
    (app, clock)
}

fn type_and_send(app: &mut App, text: &str) -> bool {
    for c in text.chars() {
        app.handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }
    app.submit()
}

fn placeholders(app: &App) -> usize {
    app.messages().iter().filter(|m| m.is_placeholder).count()
}

// =============================================================================
// Full exchanges
// =============================================================================

#[test]
fn code_question_gets_code_reply() {
    let (mut app, clock) = widget();
    assert!(type_and_send(&mut app, "Can you look at my function?"));

    let msgs = app.messages();
    assert_eq!(msgs.len(), 2);
    assert_eq!(msgs[0].sender, Sender::User);
    assert_eq!(msgs[0].text, "Can you look at my function?");
    assert!(msgs[1].is_placeholder);
    assert!(app.session_state().is_awaiting_response);

    clock.advance(DELAY - Duration::from_millis(1));
    assert!(app.tick().is_none());
    assert_eq!(placeholders(&app), 1);

    clock.advance(Duration::from_millis(1));
    let res = app.tick().unwrap();
    assert_eq!(res.category, Category::Code);

    let msgs = app.messages();
    assert_eq!(msgs.len(), 2);
    assert_eq!(msgs[1].sender, Sender::Assistant);
    assert_eq!(msgs[1].text, dispatch::reply(Category::Code));
    assert_eq!(placeholders(&app), 0);
    assert!(!app.session_state().is_awaiting_response);
}

#[test]
fn review_request_for_function_is_code() {
    let (mut app, clock) = widget();
    type_and_send(&mut app, "Can you help me review this function?");
    clock.advance(DELAY);
    assert_eq!(app.tick().unwrap().category, Category::Code);
}

#[test]
fn error_report_is_debug() {
    let (mut app, clock) = widget();
    type_and_send(&mut app, "I'm getting an error");
    clock.advance(DELAY);
    assert_eq!(app.tick().unwrap().category, Category::Debug);
    assert_eq!(
        app.messages().last().unwrap().text,
        dispatch::reply(Category::Debug)
    );
}

#[test]
fn keyword_priority_prefers_earlier_rule() {
    let (mut app, clock) = widget();
    // "error" (debug) and "performance" (optimize) both match; debug wins.
    type_and_send(&mut app, "This ERROR hurts performance");
    clock.advance(DELAY);
    assert_eq!(app.tick().unwrap().category, Category::Debug);
}

#[test]
fn unmatched_text_gets_generic_reply() {
    let (mut app, clock) = widget();
    type_and_send(&mut app, "good morning");
    clock.advance(DELAY);
    let res = app.tick().unwrap();
    assert_eq!(res.category, Category::Generic);
    assert_eq!(
        app.messages().last().unwrap().text,
        dispatch::reply(Category::Generic)
    );
}

#[test]
fn consecutive_exchanges_alternate_senders() {
    let (mut app, clock) = widget();
    for prompt in ["how do I start?", "optimize it", "thanks"] {
        assert!(type_and_send(&mut app, prompt));
        clock.advance(DELAY);
        assert!(app.tick().is_some());
    }

    let senders: Vec<Sender> = app.messages().iter().map(|m| m.sender).collect();
    assert_eq!(
        senders,
        [
            Sender::User,
            Sender::Assistant,
            Sender::User,
            Sender::Assistant,
            Sender::User,
            Sender::Assistant,
        ]
    );
    assert_eq!(app.session_state().message_count, 6);
}

// =============================================================================
// Guards and invariants
// =============================================================================

#[test]
fn whitespace_draft_cannot_be_sent() {
    let (mut app, _) = widget();
    assert!(!type_and_send(&mut app, "   \n  "));
    assert!(app.messages().is_empty());
}

#[test]
fn second_submit_refused_while_pending() {
    let (mut app, clock) = widget();
    assert!(type_and_send(&mut app, "debug please"));
    assert!(!type_and_send(&mut app, "and again"));
    assert_eq!(placeholders(&app), 1);
    assert_eq!(app.messages().len(), 2);
    // The refused draft is kept for later.
    assert_eq!(app.input().draft(), "and again");

    clock.advance(DELAY);
    app.tick();
    assert!(app.submit());
    assert_eq!(app.messages()[2].text, "and again");
}

#[test]
fn submitted_text_is_trimmed() {
    let (mut app, _) = widget();
    type_and_send(&mut app, "  hi there  ");
    assert_eq!(app.messages()[0].text, "hi there");
}

#[test]
fn each_message_is_formatted_once() {
    let (mut app, clock) = widget();
    type_and_send(&mut app, "help");
    clock.advance(DELAY);
    app.tick();
    // Extra ticks and redraw-style reads do not reformat.
    for _ in 0..5 {
        app.tick();
        for msg in app.messages() {
            assert!(app.view().get(msg.id).is_some());
        }
    }
    assert_eq!(app.view().format_calls(), 2);
}

#[test]
fn teardown_discards_pending_reply() {
    let (mut app, clock) = widget();
    type_and_send(&mut app, "fix this code");
    app.teardown();

    assert_eq!(placeholders(&app), 0);
    assert!(!app.session_state().is_awaiting_response);

    clock.advance(DELAY * 2);
    assert!(app.tick().is_none());
    assert_eq!(app.messages().len(), 1);
    assert!(app.is_torn_down());
}
