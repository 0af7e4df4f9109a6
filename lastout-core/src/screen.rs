//! Screen snapshot model + buffer assembly.
//!
//! A `ScreenContent` is what a terminal session reports as its visible (and
//! scrolled-back) lines at one moment. `assemble` flattens it into the single
//! newline-joined `TextBuffer` the extractor scans.

use std::fmt;

/// A single line of screen text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScreenLine {
    pub string: String,
}

impl ScreenLine {
    pub fn new(string: impl Into<String>) -> Self {
        Self {
            string: string.into(),
        }
    }
}

/// Read-only snapshot of a session's lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScreenContent {
    lines: Vec<ScreenLine>,
}

impl ScreenContent {
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(ScreenLine::new).collect(),
        }
    }

    /// Split raw captured terminal text into lines.
    ///
    /// CRLF line endings collapse to one line each, and the empty segment
    /// after a final newline is not a line.
    pub fn from_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }

        let mut lines: Vec<ScreenLine> = text
            .split('\n')
            .map(|l| ScreenLine::new(l.strip_suffix('\r').unwrap_or(l)))
            .collect();

        if text.ends_with('\n') {
            lines.pop();
        }

        Self { lines }
    }

    pub fn number_of_lines(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, i: usize) -> Option<&ScreenLine> {
        self.lines.get(i)
    }

    pub fn lines(&self) -> impl Iterator<Item = &ScreenLine> {
        self.lines.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Newline-joined screen text. Every line is newline-terminated, the last included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer(String);

impl TextBuffer {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for TextBuffer {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Flatten a snapshot into a `TextBuffer`.
///
/// Returns `None` for absent or zero-line content so callers treat it as
/// "not found" instead of scanning an empty string.
pub fn assemble(content: Option<&ScreenContent>) -> Option<TextBuffer> {
    let content = content?;
    if content.is_empty() {
        return None;
    }

    let capacity: usize = content.lines().map(|l| l.string.len() + 1).sum();
    let mut buffer = String::with_capacity(capacity);
    for line in content.lines() {
        buffer.push_str(&line.string);
        buffer.push('\n');
    }

    Some(TextBuffer(buffer))
}
