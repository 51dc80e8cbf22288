//! Property tests for the draft input and the reply classifier.
//!
//! Verifies:
//! 1. The counter reads `L/2000` and warns exactly when `L > 1800`.
//! 2. Input height stays within its bounds for any draft.
//! 3. Send is enabled iff the draft has non-whitespace and nothing is pending.
//! 4. Classification is total and honours rule priority.

use std::time::Duration;

use codemate::app::App;
use codemate::chat::dispatch::classify;
use codemate::chat::typing::{FixedDelay, ManualClock};
use codemate::config::ClientConfig;
use codemate::input::{InputController, MAX_CHARS};
use codemate_proto::category::Category;
use proptest::prelude::*;

fn widget() -> App {
    let config = ClientConfig {
        welcome: false,
        ..ClientConfig::default()
    };
    App::with_parts(
        &config,
        Box::new(ManualClock::new(0)),
        Box::new(FixedDelay(Duration::from_millis(1500))),
    )
}

/// Text drawn from a keyword-free alphabet.
fn filler() -> impl Strategy<Value = String> {
    "[xyzqjkv ]{0,40}"
}

proptest! {
    #[test]
    fn counter_tracks_char_length(len in 0usize..=2200, ch in prop::sample::select(vec!['a', 'é', '\u{1f680}', ' '])) {
        let mut input = InputController::default();
        input.set_draft(std::iter::repeat_n(ch, len).collect::<String>());

        let counter = input.counter();
        prop_assert_eq!(counter.to_string(), format!("{len}/{MAX_CHARS}"));
        prop_assert_eq!(counter.is_warning(), len > 1800);
    }

    #[test]
    fn height_stays_in_bounds(draft in "[a-z\n ]{0,400}", width in 1u16..120) {
        let mut input = InputController::default();
        input.set_wrap_width(width);
        input.set_draft(draft);
        let h = input.height_units();
        prop_assert!((20..=120).contains(&h));
        prop_assert_eq!(h % 20, 0);
    }

    #[test]
    fn send_enabled_iff_text_and_idle(draft in "[a-z \t\n]{0,20}", pending in any::<bool>()) {
        let mut app = widget();
        if pending {
            app.dispatch_named("quick-action:review").unwrap();
            prop_assert!(app.submit());
        }
        for c in draft.chars() {
            app.handle_key_event(crossterm::event::KeyEvent::new(
                crossterm::event::KeyCode::Char(c),
                crossterm::event::KeyModifiers::NONE,
            ));
        }
        let has_text = !draft.trim().is_empty();
        prop_assert_eq!(app.can_submit(), has_text && !pending);
    }

    #[test]
    fn classification_is_total(text in "\\PC{0,200}") {
        let category = classify(&text);
        prop_assert!(Category::ALL.contains(&category));
    }

    #[test]
    fn earlier_rule_wins(
        pre in filler(),
        mid in filler(),
        post in filler(),
        code_kw in prop::sample::select(vec!["function", "CODE"]),
        later_kw in prop::sample::select(vec!["debug", "Error", "optimize", "performance", "help", "How"]),
        code_first in any::<bool>(),
    ) {
        let text = if code_first {
            format!("{pre}{code_kw}{mid}{later_kw}{post}")
        } else {
            format!("{pre}{later_kw}{mid}{code_kw}{post}")
        };
        prop_assert_eq!(classify(&text), Category::Code);
    }

    #[test]
    fn keyword_free_text_is_generic(text in filler()) {
        prop_assert_eq!(classify(&text), Category::Generic);
    }
}
