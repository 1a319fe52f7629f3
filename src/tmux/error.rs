// ABOUTME: Error types for remote tmux session management
// Defines error conditions that can occur when querying or mutating remote sessions

use thiserror::Error;

use crate::remote::RemoteError;

#[derive(Debug, Error)]
pub enum TmuxError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("Remote command exited with status {code}: {command}")]
    CommandFailed { command: String, code: i32 },

    /// A kill that exited non-zero. The transport cannot tell a missing
    /// session apart from a dropped connection, so both land here.
    #[error("Session '{0}' not found on remote.")]
    SessionNotFound(String),
}
