//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use lastout_core::{SourceSpec, Terminator};

/// Marker terminator argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TerminatorArg {
    Bel,
    St,
}

impl From<TerminatorArg> for Terminator {
    fn from(arg: TerminatorArg) -> Self {
        match arg {
            TerminatorArg::Bel => Terminator::Bel,
            TerminatorArg::St => Terminator::St,
        }
    }
}

/// Log level argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// As an `EnvFilter` directive.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevelArg::Off => "off",
            LogLevelArg::Error => "error",
            LogLevelArg::Warn => "warn",
            LogLevelArg::Info => "info",
            LogLevelArg::Debug => "debug",
            LogLevelArg::Trace => "trace",
        }
    }
}

/// lastout - print the output of the last completed command in a terminal session
#[derive(Debug, Parser)]
#[command(name = "lastout")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read the session from a raw capture file (script(1), tmux pipe-pane, ...)
    #[arg(long, value_name = "PATH", conflicts_with_all = ["stdin", "exec", "tmux_pane"])]
    pub file: Option<PathBuf>,

    /// Read the session capture from standard input
    #[arg(long, conflicts_with_all = ["exec", "tmux_pane"])]
    pub stdin: bool,

    /// Run a shell command and read the session from its stdout
    #[arg(long, value_name = "COMMAND", conflicts_with = "tmux_pane")]
    pub exec: Option<String>,

    /// Read this tmux pane's log (default: the pane lastout runs in)
    #[arg(long, value_name = "PANE")]
    pub tmux_pane: Option<String>,

    /// Start logging the tmux pane with `pipe-pane` and print the log path
    #[arg(long, conflicts_with_all = ["file", "stdin", "exec", "json"])]
    pub attach: bool,

    /// Byte sequence closing the shell-integration markers
    #[arg(long, value_enum)]
    pub terminator: Option<TerminatorArg>,

    /// Print {"output": ..., "exit_code": ...} instead of the raw output
    #[arg(long)]
    pub json: bool,

    /// Configuration file (default: $LASTOUT_CONFIG, then the platform config dir)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Give up on fetching the screen after this many milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Log level (overrides config, LASTOUT_LOG and RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

impl Cli {
    /// The session source picked on the command line, if any.
    pub fn source_spec(&self) -> Option<SourceSpec> {
        if let Some(path) = &self.file {
            return Some(SourceSpec::File(path.clone()));
        }
        if self.stdin {
            return Some(SourceSpec::Stdin);
        }
        if let Some(command) = &self.exec {
            return Some(SourceSpec::Command(command.clone()));
        }
        self.tmux_pane
            .as_ref()
            .map(|pane| SourceSpec::Tmux(Some(pane.clone())))
    }
}
