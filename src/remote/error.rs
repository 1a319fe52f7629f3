// ABOUTME: Error types for the remote command channel
// Only transport-level failures live here; non-zero exit codes are returned as data

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Failed to run ssh: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Command cannot be quoted for the remote shell: {0}")]
    Quote(String),

    #[error("Remote command on {host} timed out after {secs}s")]
    Timeout { host: String, secs: u64 },
}
