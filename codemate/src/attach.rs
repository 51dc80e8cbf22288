//! Folding a local source file into the draft.
//!
//! Only files with an allowed source-code extension can be picked. The
//! file's text replaces the draft as a short request followed by a fenced
//! block tagged with the extension.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

/// Extensions the picker accepts.
pub const ALLOWED_EXTENSIONS: [&str; 13] = [
    "js", "ts", "jsx", "tsx", "css", "scss", "html", "php", "py", "java", "cpp", "c", "h",
];

/// Extension of `name`: everything after the last `.`, or the whole name
/// when there is no dot.
#[must_use]
pub fn file_extension(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(_, ext)| ext)
}

/// Whether `path` may be picked. Extensions match ignoring ASCII case.
#[must_use]
pub fn is_allowed(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.rsplit_once('.'))
        .is_some_and(|(_, ext)| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
}

/// The draft text for an attached file.
#[must_use]
pub fn compose_draft(file_name: &str, content: &str) -> String {
    let ext = file_extension(file_name);
    format!(
        "I've attached a {} file ({file_name}). Can you review it?\n\n```{ext}\n{content}\n```",
        ext.to_uppercase()
    )
}

/// Reads picked files as text.
pub trait FileSource: Send + Sync {
    /// Read the whole file at `path` as UTF-8 text.
    fn read_text(
        &self,
        path: &Path,
    ) -> impl std::future::Future<Output = io::Result<String>> + Send;
}

/// Reads from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFiles;

impl FileSource for DiskFiles {
    async fn read_text(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }
}

/// In-memory files keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryFiles {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
}

impl MemoryFiles {
    /// Create an empty set of files.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.lock().insert(path.into(), content.into());
    }
}

impl FileSource for MemoryFiles {
    async fn read_text(&self, path: &Path) -> io::Result<String> {
        self.files.lock().get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }
}

/// Inline path prompt that stands in for a file picker dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathPrompt {
    text: String,
}

impl PathPrompt {
    /// An empty prompt.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Typed path so far.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Append a character.
    pub fn push(&mut self, c: char) {
        self.text.push(c);
    }

    /// Remove the last character.
    pub fn pop(&mut self) {
        self.text.pop();
    }

    /// The picked path, or `None` when nothing usable was entered.
    ///
    /// Blank input counts as cancelling; a disallowed extension cannot be
    /// picked.
    #[must_use]
    pub fn pick(&self) -> Option<PathBuf> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let path = PathBuf::from(trimmed);
        if !is_allowed(&path) {
            tracing::debug!(path = %path.display(), "extension not allowed");
            return None;
        }
        Some(path)
    }
}
