//! TOML configuration.
//!
//! Lookup order: explicit path (`--config`), `$LASTOUT_CONFIG`, then
//! `<config dir>/lastout/config.toml`. A missing default file means built-in
//! defaults; a missing or broken explicit file is an error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::locator::SourceSpec;
use crate::source::tmux::{DEFAULT_TMUX_COMMAND, default_log_dir};
use crate::term::{MarkerSet, Terminator};

pub const CONFIG_ENV: &str = "LASTOUT_CONFIG";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub terminator: Terminator,
    /// tracing filter directive, e.g. "warn" or "lastout_core=debug"
    pub log_level: Option<String>,
    pub fetch_timeout_ms: u64,
    pub source: SourceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            terminator: Terminator::Bel,
            log_level: None,
            fetch_timeout_ms: 5000,
            source: SourceConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Auto,
    File,
    Stdin,
    Command,
    Tmux,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub path: Option<PathBuf>,
    pub command: Option<String>,
    pub tmux_pane: Option<String>,
    pub tmux_command: String,
    /// Directory holding `pipe-pane` logs, one file per pane
    pub pane_log_dir: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Auto,
            path: None,
            command: None,
            tmux_pane: None,
            tmux_command: DEFAULT_TMUX_COMMAND.to_string(),
            pane_log_dir: None,
        }
    }
}

impl Config {
    /// Default config file location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "lastout").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load using the lookup order described at the top of this module.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
            return Self::load_from(Path::new(&path));
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_from(&path),
            _ => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config = Self::parse(&text, path)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse TOML text. `origin` is only used in error messages.
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn markers(&self) -> MarkerSet {
        MarkerSet::new(self.terminator)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn pane_log_dir(&self) -> PathBuf {
        self.source.pane_log_dir.clone().unwrap_or_else(default_log_dir)
    }

    /// Turn the `[source]` table into a `SourceSpec`.
    pub fn source_spec(&self) -> Result<SourceSpec> {
        let src = &self.source;
        match src.kind {
            SourceKind::Auto => Ok(SourceSpec::Auto),
            SourceKind::Stdin => Ok(SourceSpec::Stdin),
            SourceKind::Tmux => Ok(SourceSpec::Tmux(src.tmux_pane.clone())),
            SourceKind::File => src
                .path
                .clone()
                .map(SourceSpec::File)
                .ok_or_else(|| Error::NoSession {
                    reason: "source.kind = \"file\" but source.path is not set".to_string(),
                }),
            SourceKind::Command => src
                .command
                .clone()
                .map(SourceSpec::Command)
                .ok_or_else(|| Error::NoSession {
                    reason: "source.kind = \"command\" but source.command is not set".to_string(),
                }),
        }
    }
}
