//! Inline markup for message bubbles.
//!
//! Fenced code blocks are cut out first and kept verbatim. The prose around
//! them gets a small subset of markdown, applied in passes:
//!
//! 1. `` `code` `` spans (content is kept literal)
//! 2. `**strong**`
//! 3. `*emphasis*`
//! 4. newline to line break
//!
//! Each delimiter pair needs non-empty content free of its own delimiter
//! character, otherwise the characters stay literal. The output is a typed
//! segment list rather than a string, so formatting is a one-way step.

use serde::{Deserialize, Serialize};

/// One styled run of a formatted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    /// Unstyled text.
    Text(String),
    /// Inline code.
    Code(String),
    /// Bold text.
    Strong(String),
    /// Italic text.
    Emphasis(String),
    /// A fenced block, always on its own line(s).
    CodeBlock {
        /// Tag after the opening fence, possibly empty.
        lang: String,
        /// Lines between the fences, joined with `\n`.
        code: String,
    },
    /// Hard line break.
    LineBreak,
}

/// The result of formatting one message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedText {
    /// Segments in reading order.
    pub segments: Vec<Segment>,
}

impl FormattedText {
    /// Splits the segments into visual lines at each [`Segment::LineBreak`].
    ///
    /// Always yields at least one (possibly empty) line.
    #[must_use]
    pub fn lines(&self) -> Vec<Vec<&Segment>> {
        let mut lines = vec![Vec::new()];
        for segment in &self.segments {
            if *segment == Segment::LineBreak {
                lines.push(Vec::new());
            } else if let Some(line) = lines.last_mut() {
                line.push(segment);
            }
        }
        lines
    }

    /// Concatenated text with styling dropped and breaks as `\n`.
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(s) | Segment::Code(s) | Segment::Strong(s) | Segment::Emphasis(s) => {
                    out.push_str(s);
                }
                Segment::CodeBlock { lang, code } => {
                    out.push_str("```");
                    out.push_str(lang);
                    out.push('\n');
                    out.push_str(code);
                    out.push_str("\n```");
                }
                Segment::LineBreak => out.push('\n'),
            }
        }
        out
    }

    /// Body of the last fenced code block, if any.
    #[must_use]
    pub fn last_code_block(&self) -> Option<&str> {
        self.segments.iter().rev().find_map(|s| match s {
            Segment::CodeBlock { code, .. } => Some(code.as_str()),
            _ => None,
        })
    }
}

/// Formats raw message text into styled segments.
#[must_use]
pub fn format_markup(text: &str) -> FormattedText {
    let mut segments = Vec::new();
    for (idx, block) in split_blocks(text).into_iter().enumerate() {
        if idx > 0 {
            segments.push(Segment::LineBreak);
        }
        match block {
            Block::Prose(lines) => segments.extend(format_inline(&lines.join("\n"))),
            Block::Fence { lang, body } => segments.push(Segment::CodeBlock {
                lang: lang.to_string(),
                code: body.join("\n"),
            }),
        }
    }
    FormattedText { segments }
}

fn format_inline(text: &str) -> Vec<Segment> {
    let mut segments = vec![Segment::Text(text.to_string())];
    segments = apply_pass(segments, match_code, Segment::Code);
    segments = apply_pass(segments, match_strong, Segment::Strong);
    segments = apply_pass(segments, match_emphasis, Segment::Emphasis);
    split_line_breaks(segments)
}

enum Block<'a> {
    Prose(Vec<&'a str>),
    Fence { lang: &'a str, body: Vec<&'a str> },
}

/// An opening fence line, its tag, and the lines collected so far.
type OpenFence<'a> = (&'a str, &'a str, Vec<&'a str>);

/// Cut `text` into prose and complete fenced blocks. An unterminated fence
/// stays prose.
fn split_blocks(text: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut prose = Vec::new();
    let mut fence: Option<OpenFence<'_>> = None;

    for line in text.split('\n') {
        let fence_tag = line.trim_start().strip_prefix("```");
        match (fence.take(), fence_tag) {
            (None, Some(tag)) => fence = Some((line, tag.trim(), Vec::new())),
            (None, None) => prose.push(line),
            (Some((_, lang, body)), Some(_)) => {
                if !prose.is_empty() {
                    blocks.push(Block::Prose(std::mem::take(&mut prose)));
                }
                blocks.push(Block::Fence { lang, body });
            }
            (Some((open, lang, mut body)), None) => {
                body.push(line);
                fence = Some((open, lang, body));
            }
        }
    }

    if let Some((open, _, body)) = fence {
        prose.push(open);
        prose.extend(body);
    }
    if !prose.is_empty() || blocks.is_empty() {
        blocks.push(Block::Prose(prose));
    }
    blocks
}

/// A delimiter match: the full match range and the inner content range.
struct Span {
    start: usize,
    end: usize,
    inner_start: usize,
    inner_end: usize,
}

fn apply_pass(
    segments: Vec<Segment>,
    matcher: fn(&str, usize) -> Option<Span>,
    wrap: fn(String) -> Segment,
) -> Vec<Segment> {
    let mut out = Vec::with_capacity(segments.len());
    for segment in segments {
        let Segment::Text(text) = segment else {
            out.push(segment);
            continue;
        };

        let mut literal_from = 0;
        let mut pos = 0;
        while pos < text.len() {
            if let Some(span) = matcher(&text, pos) {
                if span.start > literal_from {
                    out.push(Segment::Text(text[literal_from..span.start].to_string()));
                }
                out.push(wrap(text[span.inner_start..span.inner_end].to_string()));
                literal_from = span.end;
                pos = span.end;
            } else {
                pos += text[pos..].chars().next().map_or(1, char::len_utf8);
            }
        }
        if literal_from < text.len() {
            out.push(Segment::Text(text[literal_from..].to_string()));
        }
    }
    out
}

/// `` `([^`]+)` ``
fn match_code(text: &str, pos: usize) -> Option<Span> {
    let rest = text[pos..].strip_prefix('`')?;
    let len = rest.find('`')?;
    (len > 0).then(|| Span {
        start: pos,
        end: pos + 1 + len + 1,
        inner_start: pos + 1,
        inner_end: pos + 1 + len,
    })
}

/// `\*\*([^*]+)\*\*`
fn match_strong(text: &str, pos: usize) -> Option<Span> {
    let rest = text[pos..].strip_prefix("**")?;
    let len = rest.find('*')?;
    (len > 0 && rest[len..].starts_with("**")).then(|| Span {
        start: pos,
        end: pos + 2 + len + 2,
        inner_start: pos + 2,
        inner_end: pos + 2 + len,
    })
}

/// `\*([^*]+)\*`
fn match_emphasis(text: &str, pos: usize) -> Option<Span> {
    let rest = text[pos..].strip_prefix('*')?;
    let len = rest.find('*')?;
    (len > 0).then(|| Span {
        start: pos,
        end: pos + 1 + len + 1,
        inner_start: pos + 1,
        inner_end: pos + 1 + len,
    })
}

fn split_line_breaks(segments: Vec<Segment>) -> Vec<Segment> {
    let mut out = Vec::with_capacity(segments.len());
    for segment in segments {
        let (content, wrap): (String, fn(String) -> Segment) = match segment {
            Segment::Text(s) => (s, Segment::Text),
            Segment::Code(s) => (s, Segment::Code),
            Segment::Strong(s) => (s, Segment::Strong),
            Segment::Emphasis(s) => (s, Segment::Emphasis),
            other @ (Segment::LineBreak | Segment::CodeBlock { .. }) => {
                out.push(other);
                continue;
            }
        };

        for (idx, piece) in content.split('\n').enumerate() {
            if idx > 0 {
                out.push(Segment::LineBreak);
            }
            if !piece.is_empty() {
                out.push(wrap(piece.to_string()));
            }
        }
    }
    out
}
