//! Property tests for inline message markup.
//!
//! Verifies:
//! 1. Formatting never panics on arbitrary input.
//! 2. Every newline becomes exactly one line break.
//! 3. Text without markup characters survives unchanged.
//! 4. Delimited spans produce the matching styled segment.
//! 5. A fenced block's body comes back verbatim.

use codemate_proto::format::{Segment, format_markup};
use proptest::prelude::*;

proptest! {
    #[test]
    fn formatting_never_panics(input in "\\PC{0,256}") {
        let _ = format_markup(&input);
    }

    #[test]
    fn one_break_per_newline(input in "[a-z \n`*]{0,128}") {
        // Fenced blocks fold their inner newlines into one segment.
        prop_assume!(!input.contains("```"));
        let out = format_markup(&input);
        let breaks = out
            .segments
            .iter()
            .filter(|s| **s == Segment::LineBreak)
            .count();
        prop_assert_eq!(breaks, input.matches('\n').count());
        prop_assert_eq!(out.lines().len(), breaks + 1);
    }

    #[test]
    fn unmarked_text_round_trips(input in "[a-zA-Z0-9 .,!?\n]{0,128}") {
        let out = format_markup(&input);
        prop_assert_eq!(out.plain_text(), input);
        prop_assert!(out.segments.iter().all(|s| matches!(s, Segment::Text(_) | Segment::LineBreak)));
    }

    #[test]
    fn backtick_span_is_code(word in "[a-z_()]{1,24}") {
        let out = format_markup(&format!("`{word}`"));
        prop_assert_eq!(out.segments, vec![Segment::Code(word)]);
    }

    #[test]
    fn double_star_span_is_strong(word in "[a-z ]{1,24}") {
        let out = format_markup(&format!("**{word}**"));
        prop_assert_eq!(out.segments, vec![Segment::Strong(word)]);
    }

    #[test]
    fn single_star_span_is_emphasis(word in "[a-z ]{1,24}") {
        let out = format_markup(&format!("*{word}*"));
        prop_assert_eq!(out.segments, vec![Segment::Emphasis(word)]);
    }

    #[test]
    fn fenced_body_is_verbatim(lang in "[a-z]{0,6}", body in "[a-z*` ]{1,40}") {
        prop_assume!(!body.trim_start().starts_with("```"));
        let out = format_markup(&format!("see:\n```{lang}\n{body}\n```"));
        prop_assert_eq!(out.last_code_block(), Some(body.as_str()));
    }
}
