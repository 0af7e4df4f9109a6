//! Glue between the command line and `lastout-core`.
//!
//! `run` resolves the session, does the single fetch + extraction, and writes
//! the result. Only errors that mean "there is no session to read" come back
//! as `Err`; a missing marker pair is a successful run with no output.
//! `attach` starts the tmux pane log that `Auto` later reads.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use lastout_core::config::Config;
use lastout_core::source::PaneLog;
use lastout_core::{Extraction, MarkerSet, SessionLocator, SourceSpec, Terminator, last_output};
use tracing::{debug, info};

pub mod cli;
pub mod util;

pub use cli::Cli;

/// Effective settings after layering CLI flags over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub spec: SourceSpec,
    pub markers: MarkerSet,
    pub timeout: Duration,
    pub tmux_command: String,
    pub pane_log_dir: PathBuf,
    pub json: bool,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: &Config) -> Result<Self> {
        let spec = match cli.source_spec() {
            Some(spec) => spec,
            None => config.source_spec()?,
        };

        let terminator = cli.terminator.map(Terminator::from).unwrap_or(config.terminator);

        let timeout = cli
            .timeout_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| config.fetch_timeout());

        Ok(Self {
            spec,
            markers: MarkerSet::new(terminator),
            timeout,
            tmux_command: config.source.tmux_command.clone(),
            pane_log_dir: config.pane_log_dir(),
            json: cli.json,
        })
    }

    fn locator(&self) -> SessionLocator {
        SessionLocator::from_env(self.spec.clone())
            .with_pane_log_dir(self.pane_log_dir.clone())
            .with_timeout(self.timeout)
    }
}

/// Start logging the selected tmux pane. Prints the log path.
pub async fn attach<W: Write>(cli: &Cli, config: &Config, out: &mut W) -> Result<PaneLog> {
    let settings = Settings::resolve(cli, config)?;
    let log = settings.locator().pane_log()?;

    log.attach(&settings.tmux_command, settings.timeout)
        .await
        .with_context(|| format!("failed to attach to tmux pane {}", log.pane()))?;

    writeln!(out, "{}", log.path().display()).context("failed to write output")?;
    out.flush().context("failed to flush output")?;
    Ok(log)
}

/// One extraction run. Writes to `out` only when a block was found.
pub async fn run<W: Write>(cli: &Cli, config: &Config, out: &mut W) -> Result<Extraction> {
    let settings = Settings::resolve(cli, config)?;
    debug!(?settings, "resolved settings");

    let source = settings.locator().locate()?;
    let extraction = last_output(source.as_ref(), &settings.markers).await;

    match &extraction {
        Extraction::Found(block) => {
            if settings.json {
                serde_json::to_writer(&mut *out, block).context("failed to encode output")?;
            } else {
                out.write_all(block.text.as_bytes())
                    .context("failed to write output")?;
            }
            out.flush().context("failed to flush output")?;
            info!(bytes = block.text.len(), exit_code = ?block.exit_code, "wrote last command output");
        }
        Extraction::NotFound => {
            info!(source = %source.describe(), "no completed command found");
        }
    }

    Ok(extraction)
}
