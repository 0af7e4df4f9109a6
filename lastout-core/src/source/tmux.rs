//! tmux pane logs.
//!
//! `capture-pane` returns the rendered grid, and tmux consumes OSC sequences
//! before they reach it, so the shell-integration markers are gone by then.
//! `pipe-pane -o` instead hands the raw bytes the pane's program wrote to a
//! shell command; appending them to a per-pane log keeps every marker. The
//! log is then read like any other capture file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use tokio::process::Command;
use tracing::info;

use super::command::run_command;
use crate::error::FetchError;

pub const DEFAULT_TMUX_COMMAND: &str = "tmux";

/// Where pane logs live unless `[source] pane_log_dir` says otherwise.
pub fn default_log_dir() -> PathBuf {
    ProjectDirs::from("", "", "lastout")
        .map(|dirs| dirs.cache_dir().join("panes"))
        .unwrap_or_else(|| std::env::temp_dir().join("lastout").join("panes"))
}

/// The marker-preserving log of one tmux pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneLog {
    pane: String,
    path: PathBuf,
}

impl PaneLog {
    pub fn new(pane: &str, dir: &Path) -> Self {
        let pane = pane.trim().to_string();
        let path = dir.join(format!("pane-{}.log", sanitize_component(&pane, "pane")));
        Self { pane, path }
    }

    pub fn pane(&self) -> &str {
        &self.pane
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Shell command tmux runs with the pane's output on its stdin.
    pub fn pipe_command(&self) -> String {
        format!("cat >> {}", shell_quote(&self.path.to_string_lossy()))
    }

    pub fn pipe_pane_args(&self) -> Vec<String> {
        vec![
            "pipe-pane".to_string(),
            "-o".to_string(),
            "-t".to_string(),
            self.pane.clone(),
            self.pipe_command(),
        ]
    }

    /// Start logging the pane. `-o` leaves an already running pipe alone,
    /// so attaching twice is harmless.
    pub async fn attach(&self, tmux_command: &str, timeout: Duration) -> Result<(), FetchError> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        let tmux = resolve_command(tmux_command);
        let args = self.pipe_pane_args();
        let mut cmd = Command::new(&tmux);
        cmd.args(&args);

        let label = format!("{} {}", tmux, args.join(" "));
        run_command(&mut cmd, &label, timeout).await?;

        info!(pane = %self.pane, log = %self.path.display(), "attached pane log");
        Ok(())
    }
}

fn resolve_command(command: &str) -> String {
    let command = command.trim();
    if command.is_empty() {
        DEFAULT_TMUX_COMMAND.to_string()
    } else {
        command.to_string()
    }
}

fn sanitize_component(value: &str, fallback: &str) -> String {
    let out: String = value
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '-'
            }
        })
        .collect();

    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
