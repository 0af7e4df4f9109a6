use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop a run. Everything else is downgraded to "not found".
#[derive(Debug, Error)]
pub enum Error {
    /// No terminal session could be resolved to read from.
    #[error("no terminal session: {reason}")]
    NoSession { reason: String },

    /// A marker literal was empty.
    #[error("invalid {which} marker: must not be empty")]
    InvalidMarker { which: &'static str },

    #[error("config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

/// Why a screen snapshot could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}
