// ABOUTME: Session lifecycle orchestration across remote tmux sessions and local windows
// Provides name validation, attach commands, and the controller driving both sides

pub mod attach;
pub mod controller;
pub mod error;
pub mod name;
pub mod report;

pub use attach::attach_command;
pub use controller::{SessionController, SessionOverview};
pub use error::SessionError;
pub use name::SessionName;
pub use report::{BatchReport, Resolution, SessionFailure};
