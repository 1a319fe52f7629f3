// ABOUTME: Remote tmux session management
// Builds multiplexer commands and queries the remote session table through a RemoteChannel

pub mod commands;
pub mod error;
pub mod palette;
pub mod registry;

pub use commands::{full_name, PREFIX};
pub use error::TmuxError;
pub use registry::{parse_listing, SessionRegistry};
