// ABOUTME: User-facing error kinds for session lifecycle operations
// Every kind is reported once with a short message and a non-zero exit; nothing retries

use thiserror::Error;

use crate::terminal::WindowError;
use crate::tmux::TmuxError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No SSH host configured. Run: resume --setup")]
    ConfigurationMissing,

    #[error("Invalid session name: {0}")]
    InvalidName(String),

    #[error(transparent)]
    RemoteCommand(#[from] TmuxError),

    #[error(transparent)]
    Automation(#[from] WindowError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl SessionError {
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Follow-up advice printed under the message, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            SessionError::InvalidName(_) => {
                Some("Only letters, numbers, hyphens, and underscores are allowed.")
            }
            _ => None,
        }
    }
}
