// ABOUTME: Contract for the local window collaborator
// Discovery is by title scan, so every lookup is best-effort against external changes

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("Window automation failed: {0}")]
    AutomationFailed(String),

    #[error("Failed to run window automation: {0}")]
    Io(#[from] std::io::Error),
}

/// Which window titles an operation applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleMatch {
    Exact(String),
    Prefix(String),
}

impl TitleMatch {
    pub fn matches(&self, title: &str) -> bool {
        match self {
            TitleMatch::Exact(expected) => title == expected,
            TitleMatch::Prefix(prefix) => title.starts_with(prefix.as_str()),
        }
    }
}

#[async_trait]
pub trait WindowManager: Send + Sync {
    /// Open a new window running `command` and title it `title`.
    async fn open(&self, title: &str, command: &str) -> Result<(), WindowError>;

    /// Titles of currently open windows that match.
    async fn find_by_title(&self, pattern: &TitleMatch) -> Result<Vec<String>, WindowError>;

    /// Ask matching windows to exit, then force-close any that remain.
    ///
    /// Finding nothing to close is success.
    async fn close_by_title(&self, pattern: &TitleMatch) -> Result<(), WindowError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        let pattern = TitleMatch::Exact("resume-web".to_string());
        assert!(pattern.matches("resume-web"));
        assert!(!pattern.matches("resume-web2"));
        assert!(!pattern.matches("resume-api"));
    }

    #[test]
    fn test_prefix_match() {
        let pattern = TitleMatch::Prefix("resume-".to_string());
        assert!(pattern.matches("resume-web"));
        assert!(pattern.matches("resume-api"));
        assert!(!pattern.matches("bash"));
    }
}
