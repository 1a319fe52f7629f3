// ABOUTME: ssh-backed remote channel
// Wraps each command in the remote login shell so the user's PATH (Homebrew etc.) applies

use std::future::Future;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::{RemoteChannel, RemoteError, RemoteOutput};

/// Disables pseudo-terminal allocation so scripted commands neither hang nor echo escapes.
pub const SSH_OPTIONS: [&str; 2] = ["-o", "RequestTTY=no"];

/// Expanded on the remote side to the user's own login shell.
pub const REMOTE_SHELL: &str = "$SHELL -lc";

#[derive(Debug, Clone, Default)]
pub struct SshChannel {
    timeout: Option<Duration>,
}

impl SshChannel {
    /// Kill the ssh process and fail with [`RemoteError::Timeout`] once `timeout` elapses.
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// The single argument handed to ssh: `$SHELL -lc '<command>'`.
    pub fn remote_invocation(command: &str) -> Result<String, RemoteError> {
        let quoted =
            shlex::try_quote(command).map_err(|e| RemoteError::Quote(e.to_string()))?;
        Ok(format!("{} {}", REMOTE_SHELL, quoted))
    }
}

/// Await `work`, giving up with [`RemoteError::Timeout`] once `limit` elapses.
///
/// Dropping the future on timeout drops the child, which `kill_on_drop` reaps.
async fn bounded<T, F>(host: &str, limit: Option<Duration>, work: F) -> Result<T, RemoteError>
where
    F: Future<Output = std::io::Result<T>>,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, work)
            .await
            .map_err(|_| RemoteError::Timeout {
                host: host.to_string(),
                secs: limit.as_secs(),
            })?
            .map_err(RemoteError::from),
        None => Ok(work.await?),
    }
}

#[async_trait]
impl RemoteChannel for SshChannel {
    async fn run(&self, host: &str, command: &str) -> Result<RemoteOutput, RemoteError> {
        let invocation = Self::remote_invocation(command)?;
        debug!("ssh {}: {}", host, command);

        let mut cmd = Command::new("ssh");
        cmd.args(SSH_OPTIONS)
            .arg(host)
            .arg(&invocation)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = bounded(host, self.timeout, cmd.output()).await?;

        // Signal-terminated processes have no exit code
        let exit_code = output.status.code().unwrap_or(-1);
        if exit_code != 0 {
            debug!(
                "ssh {} exited with {}: {}",
                host,
                exit_code,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(RemoteOutput {
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        })
    }
}
