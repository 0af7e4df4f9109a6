use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use super::{FetchOutcome, ScreenSource};
use crate::error::FetchError;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_millis(5000);

/// Runs a shell command and treats its stdout as the screen.
///
/// Routed through the system shell so pipes and redirects work.
#[derive(Debug, Clone)]
pub struct CommandSource {
    command: String,
    timeout: Duration,
}

impl CommandSource {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

#[async_trait]
impl ScreenSource for CommandSource {
    fn describe(&self) -> String {
        format!("command `{}`", self.command)
    }

    async fn fetch_screen(&self) -> FetchOutcome {
        #[cfg(windows)]
        let mut cmd = {
            let mut c = Command::new("cmd");
            c.args(["/C", self.command.as_str()]);
            c
        };

        #[cfg(not(windows))]
        let mut cmd = {
            let mut c = Command::new("sh");
            c.args(["-c", self.command.as_str()]);
            c
        };

        run_capture(&mut cmd, &self.command, self.timeout).await
    }
}

async fn run_capture(cmd: &mut Command, label: &str, timeout: Duration) -> FetchOutcome {
    match run_command(cmd, label, timeout).await {
        Ok(stdout) => FetchOutcome::from_bytes(&stdout),
        Err(e) => FetchOutcome::Failed(e),
    }
}

/// Run `cmd` to completion and return its stdout. Non-zero exit is an error.
pub(crate) async fn run_command(
    cmd: &mut Command,
    label: &str,
    timeout: Duration,
) -> Result<Vec<u8>, FetchError> {
    cmd.kill_on_drop(true);

    let output = match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(source)) => {
            return Err(FetchError::Spawn {
                command: label.to_string(),
                source,
            });
        }
        Err(_) => return Err(FetchError::Timeout(timeout)),
    };

    if !output.status.success() {
        return Err(FetchError::CommandFailed {
            command: label.to_string(),
            status: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output.stdout)
}
