// ABOUTME: Outcomes of lifecycle operations, for presentation by the caller

use super::SessionError;

/// What `resolve` did for a single name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Created,
    Resumed,
    /// Attached elsewhere already; no window was opened.
    AlreadyAttached,
}

#[derive(Debug)]
pub struct SessionFailure {
    pub name: String,
    pub error: SessionError,
}

/// Aggregate result of an operation that touches many sessions.
///
/// One session failing never aborts the rest of the batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub completed: Vec<String>,
    pub failures: Vec<SessionFailure>,
    /// Best-effort cleanup (window close, relay sweep) that did not succeed.
    pub cleanup_errors: Vec<SessionError>,
}

impl BatchReport {
    /// No session was targeted at all, as opposed to every target failing.
    pub fn is_empty(&self) -> bool {
        self.completed.is_empty() && self.failures.is_empty()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.cleanup_errors.is_empty()
    }

    pub(crate) fn record(&mut self, name: &str, result: Result<(), SessionError>) {
        match result {
            Ok(()) => self.completed.push(name.to_string()),
            Err(error) => self.failures.push(SessionFailure {
                name: name.to_string(),
                error,
            }),
        }
    }
}
