// ABOUTME: Core data models for remote sessions as reported by the host's multiplexer

pub mod session;

pub use session::{Session, SessionState};
