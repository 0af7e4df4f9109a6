//! Marker extraction.
//!
//! The scroll buffer holds markers from every command run in the session.
//! The most recent *completed* command is the one owning the last end marker;
//! its start is the nearest start marker before that end, which is not
//! necessarily the last start marker in the buffer (a still-running command
//! has a start but no end yet).
//!
//! Search order is end first, then start bounded above by the end index.

use serde::Serialize;
use tracing::debug;

use crate::screen::TextBuffer;
use crate::term::MarkerSet;
use crate::term::osc::parse_exit_status;

/// Byte offsets of the chosen marker pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerSpan {
    /// Where the start marker begins.
    pub start_marker: usize,
    /// First byte after the start marker.
    pub start: usize,
    /// Where the end prefix begins (exclusive end of the output).
    pub end: usize,
    /// First byte after the end prefix (exit status lives here).
    pub status: usize,
}

/// Output of the last completed command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputBlock {
    #[serde(rename = "output")]
    pub text: String,
    pub exit_code: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Found(OutputBlock),
    NotFound,
}

impl Extraction {
    pub fn is_found(&self) -> bool {
        matches!(self, Extraction::Found(_))
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Extraction::Found(block) => Some(&block.text),
            Extraction::NotFound => None,
        }
    }

    pub fn into_block(self) -> Option<OutputBlock> {
        match self {
            Extraction::Found(block) => Some(block),
            Extraction::NotFound => None,
        }
    }
}

/// Strip surrounding whitespace, counting the ASCII information separators
/// (0x1c-0x1f) as whitespace the way Python's `str.strip` does.
pub fn trim_output(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || ('\x1c'..='\x1f').contains(&c))
}

/// Find the last end prefix and the last start marker strictly before it.
pub fn locate(buffer: &str, start_marker: &str, end_prefix: &str) -> Option<MarkerSpan> {
    if start_marker.is_empty() || end_prefix.is_empty() {
        return None;
    }

    let end = buffer.rfind(end_prefix)?;
    let start_marker_idx = buffer[..end].rfind(start_marker)?;

    Some(MarkerSpan {
        start_marker: start_marker_idx,
        start: start_marker_idx + start_marker.len(),
        end,
        status: end + end_prefix.len(),
    })
}

/// Text between the last completed marker pair, whitespace-trimmed.
///
/// `None` means no ordered pair exists. `Some("")` means the command printed
/// nothing visible.
pub fn extract(buffer: &str, start_marker: &str, end_prefix: &str) -> Option<String> {
    let span = locate(buffer, start_marker, end_prefix)?;
    Some(trim_output(&buffer[span.start..span.end]).to_string())
}

impl MarkerSet {
    pub fn locate(&self, buffer: &TextBuffer) -> Option<MarkerSpan> {
        locate(buffer.as_str(), self.start(), self.end_prefix())
    }

    /// Run the extraction over an assembled buffer.
    pub fn extract(&self, buffer: &TextBuffer) -> Extraction {
        let text = buffer.as_str();

        let Some(span) = self.locate(buffer) else {
            debug!(bytes = text.len(), "no completed marker pair in buffer");
            return Extraction::NotFound;
        };

        debug!(
            start = span.start_marker,
            end = span.end,
            "matched marker pair"
        );

        Extraction::Found(OutputBlock {
            text: trim_output(&text[span.start..span.end]).to_string(),
            exit_code: parse_exit_status(&text[span.status..]),
        })
    }
}
