//! External command execution with timeouts

use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::error::{Error, Result};

/// Run a shell snippet through `bash -c` and return its trimmed stdout.
///
/// The child is killed if `timeout` elapses first.
pub async fn run_shell(script: &str, timeout: Duration) -> Result<String> {
    tracing::debug!(%script, timeout_secs = timeout.as_secs(), "running shell command");

    let child = Command::new("bash")
        .arg("-c")
        .arg(script)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output();

    let output = match tokio::time::timeout(timeout, child).await {
        Ok(result) => result.map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::CommandNotFound {
                command: "bash".to_string(),
            },
            _ => Error::Io(e),
        })?,
        Err(_) => {
            return Err(Error::Timeout {
                command: script.to_string(),
                seconds: timeout.as_secs(),
            });
        }
    };

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let code = output.status.code().unwrap_or(-1);
        Err(Error::CommandFailed {
            command: script.to_string(),
            code,
            stderr,
        })
    }
}
