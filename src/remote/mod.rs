// ABOUTME: Remote command channel for running single commands on the configured host
// Every observation and mutation of remote session state flows through here

pub mod channel;
pub mod error;
pub mod ssh;

pub use channel::{RemoteChannel, RemoteOutput};
pub use error::RemoteError;
pub use ssh::SshChannel;
