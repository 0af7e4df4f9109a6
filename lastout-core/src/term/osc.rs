use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// OSC introducer: ESC ]
pub const OSC: &str = "\x1b]";

/// OSC 133;B payload: command start (user hit enter, output follows).
pub const COMMAND_START: &str = "133;B";

/// OSC 133;D; payload prefix: command finished, exit status follows.
pub const COMMAND_FINISHED: &str = "133;D;";

/// Byte sequence that closes an OSC marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terminator {
    /// BEL (0x07). What bash/zsh integrations emit by default.
    #[default]
    Bel,
    /// ST: ESC \
    St,
}

impl Terminator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Terminator::Bel => "\x07",
            Terminator::St => "\x1b\\",
        }
    }
}

/// The pair of literals used to find a command's output in a buffer.
///
/// `start` is matched in full. `end_prefix` is a prefix only: the exit status
/// and terminator that follow it are not part of the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSet {
    start: String,
    end_prefix: String,
    terminator: Terminator,
}

impl MarkerSet {
    /// OSC 133 markers closed with the given terminator.
    pub fn new(terminator: Terminator) -> Self {
        Self {
            start: format!("{OSC}{COMMAND_START}{}", terminator.as_str()),
            end_prefix: format!("{OSC}{COMMAND_FINISHED}"),
            terminator,
        }
    }

    /// Arbitrary literals (e.g. a shell integration that uses different codes).
    /// Both must be non-empty: an empty literal matches everywhere.
    pub fn custom(
        start: impl Into<String>,
        end_prefix: impl Into<String>,
        terminator: Terminator,
    ) -> Result<Self> {
        let start = start.into();
        let end_prefix = end_prefix.into();

        if start.is_empty() {
            return Err(Error::InvalidMarker { which: "start" });
        }
        if end_prefix.is_empty() {
            return Err(Error::InvalidMarker { which: "end prefix" });
        }

        Ok(Self {
            start,
            end_prefix,
            terminator,
        })
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end_prefix(&self) -> &str {
        &self.end_prefix
    }

    pub fn terminator(&self) -> Terminator {
        self.terminator
    }
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self::new(Terminator::default())
    }
}

/// Parse the exit status that trails a `133;D;` prefix.
///
/// `tail` is the buffer text right after the prefix. Common forms:
/// `0\x07`, `127\x1b\\`, `1;aid=42\x07`. Anything unparsable yields `None`.
pub fn parse_exit_status(tail: &str) -> Option<i32> {
    let end = tail
        .find(|c: char| c == '\x07' || c == '\x1b' || c == ';' || c == '\n' || c == '\r')
        .unwrap_or(tail.len());

    tail[..end].trim().parse::<i32>().ok()
}
