// ABOUTME: Contract for executing one command string on a remote host
// Implementations must run non-interactively and never allocate a pseudo-terminal

use async_trait::async_trait;

use super::RemoteError;

/// Exit status and captured standard output of one remote command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemoteOutput {
    pub exit_code: i32,
    pub stdout: String,
}

impl RemoteOutput {
    pub fn new(exit_code: i32, stdout: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs `command` through the user's login shell on `host`.
///
/// A non-zero exit code is not an error at this layer: network, auth and
/// semantic failures all look the same to the transport, so callers decide
/// what a given exit code means. Nothing is retried.
#[async_trait]
pub trait RemoteChannel: Send + Sync {
    async fn run(&self, host: &str, command: &str) -> Result<RemoteOutput, RemoteError>;
}
