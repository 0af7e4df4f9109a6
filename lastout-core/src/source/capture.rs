//! Sources backed by raw terminal captures: a log file written by
//! `script(1)` / `tmux pipe-pane`, or the same bytes piped on stdin.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncReadExt;

use super::{FetchOutcome, ScreenSource};

#[derive(Debug, Clone)]
pub struct CaptureFileSource {
    path: PathBuf,
}

impl CaptureFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ScreenSource for CaptureFileSource {
    fn describe(&self) -> String {
        format!("capture file {}", self.path.display())
    }

    async fn fetch_screen(&self) -> FetchOutcome {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => FetchOutcome::from_bytes(&bytes),
            Err(e) => FetchOutcome::Failed(e.into()),
        }
    }
}

/// Reads standard input to EOF on each fetch.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinSource;

#[async_trait]
impl ScreenSource for StdinSource {
    fn describe(&self) -> String {
        "standard input".to_string()
    }

    async fn fetch_screen(&self) -> FetchOutcome {
        let mut bytes = Vec::new();
        match tokio::io::stdin().read_to_end(&mut bytes).await {
            Ok(_) => FetchOutcome::from_bytes(&bytes),
            Err(e) => FetchOutcome::Failed(e.into()),
        }
    }
}
