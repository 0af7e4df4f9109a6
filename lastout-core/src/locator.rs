//! Session resolution: "which terminal are we reading from?"
//!
//! Explicit choices (file, stdin, command, pane id) win. `Auto` looks for the
//! tmux pane this process runs in and reads that pane's log. Failing to
//! resolve anything is the one error that ends a run with a non-zero status.

use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::error::{Error, Result};
use crate::source::command::DEFAULT_FETCH_TIMEOUT;
use crate::source::tmux::default_log_dir;
use crate::source::{CaptureFileSource, CommandSource, PaneLog, ScreenSource, StdinSource};

/// Environment variable tmux sets for every process inside a pane.
pub const TMUX_PANE_ENV: &str = "TMUX_PANE";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SourceSpec {
    #[default]
    Auto,
    File(PathBuf),
    Stdin,
    Command(String),
    /// `None` means "the pane we are running in".
    Tmux(Option<String>),
}

#[derive(Debug, Clone)]
pub struct SessionLocator {
    spec: SourceSpec,
    current_pane: Option<String>,
    pane_log_dir: PathBuf,
    timeout: Duration,
}

impl SessionLocator {
    /// Locator whose notion of "current pane" comes from `$TMUX_PANE`.
    pub fn from_env(spec: SourceSpec) -> Self {
        Self::new(spec, std::env::var(TMUX_PANE_ENV).ok())
    }

    pub fn new(spec: SourceSpec, current_pane: Option<String>) -> Self {
        Self {
            spec,
            current_pane: current_pane.filter(|p| !p.trim().is_empty()),
            pane_log_dir: default_log_dir(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_pane_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.pane_log_dir = dir.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn spec(&self) -> &SourceSpec {
        &self.spec
    }

    /// The log of the pane this locator points at: the explicit pane for
    /// `Tmux(Some(_))`, otherwise the current one.
    pub fn pane_log(&self) -> Result<PaneLog> {
        let pane = match &self.spec {
            SourceSpec::Tmux(Some(pane)) if !pane.trim().is_empty() => pane,
            _ => self.current_pane.as_ref().ok_or_else(|| Error::NoSession {
                reason: format!(
                    "not inside a tmux pane (${TMUX_PANE_ENV} unset); pass --file with a terminal capture"
                ),
            })?,
        };

        Ok(PaneLog::new(pane, &self.pane_log_dir))
    }

    pub fn locate(&self) -> Result<Box<dyn ScreenSource>> {
        let source: Box<dyn ScreenSource> = match &self.spec {
            SourceSpec::File(path) => {
                if !path.exists() {
                    return Err(Error::NoSession {
                        reason: format!("capture file {} does not exist", path.display()),
                    });
                }
                Box::new(CaptureFileSource::new(path.clone()))
            }
            SourceSpec::Stdin => Box::new(StdinSource),
            SourceSpec::Command(command) => {
                if command.trim().is_empty() {
                    return Err(Error::NoSession {
                        reason: "capture command is empty".to_string(),
                    });
                }
                Box::new(CommandSource::new(command.clone()).with_timeout(self.timeout))
            }
            SourceSpec::Tmux(_) | SourceSpec::Auto => {
                let log = self.pane_log()?;
                if !log.path().is_file() {
                    return Err(Error::NoSession {
                        reason: format!(
                            "tmux pane {} has no output log at {}; run `lastout --attach` in the pane first, or pass --file",
                            log.pane(),
                            log.path().display()
                        ),
                    });
                }
                Box::new(CaptureFileSource::new(log.path()))
            }
        };

        debug!(source = %source.describe(), "located session");
        Ok(source)
    }
}
