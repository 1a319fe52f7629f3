// ABOUTME: Persisted user configuration for the remote host and agent forwarding
// Loaded once per invocation and passed explicitly to the session controller

pub mod setup;
pub mod store;

pub use setup::{run_setup, SetupError};
pub use store::{Config, ConfigError, ConfigStore};
