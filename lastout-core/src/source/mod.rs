//! Screen sources.
//!
//! A `ScreenSource` is the one external capability the extractor needs: "give
//! me the current buffer of a terminal session". Fetching is the only await
//! in a run; everything after it is pure.

use async_trait::async_trait;

use crate::error::FetchError;
use crate::screen::ScreenContent;

pub mod capture;
pub mod command;
pub mod tmux;

pub use capture::{CaptureFileSource, StdinSource};
pub use command::CommandSource;
pub use tmux::PaneLog;

/// Result of one snapshot fetch.
///
/// `Absent` is an expected outcome (nothing captured yet), not a failure.
#[derive(Debug)]
pub enum FetchOutcome {
    Content(ScreenContent),
    Absent,
    Failed(FetchError),
}

impl FetchOutcome {
    /// Wrap raw captured bytes. Empty input is `Absent`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return FetchOutcome::Absent;
        }
        let text = String::from_utf8_lossy(bytes);
        FetchOutcome::Content(ScreenContent::from_text(&text))
    }
}

/// The interface for anything that can report a session's screen.
#[async_trait]
pub trait ScreenSource: Send + Sync {
    /// Human-readable name for logs and diagnostics.
    fn describe(&self) -> String;

    async fn fetch_screen(&self) -> FetchOutcome;
}

/// In-memory snapshot. Every fetch returns a clone of the same content.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    content: Option<ScreenContent>,
}

impl StaticSource {
    pub fn new(content: ScreenContent) -> Self {
        Self {
            content: Some(content),
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self::new(ScreenContent::from_text(text))
    }

    /// A source that never has anything to report.
    pub fn absent() -> Self {
        Self { content: None }
    }
}

#[async_trait]
impl ScreenSource for StaticSource {
    fn describe(&self) -> String {
        "static snapshot".to_string()
    }

    async fn fetch_screen(&self) -> FetchOutcome {
        match &self.content {
            Some(content) => FetchOutcome::Content(content.clone()),
            None => FetchOutcome::Absent,
        }
    }
}
