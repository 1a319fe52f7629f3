// ABOUTME: Validated session names
// Names are interpolated into remote shell commands, so this pattern is the injection boundary

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use super::SessionError;

lazy_static! {
    static ref NAME_PATTERN: Regex =
        Regex::new(r"^[A-Za-z0-9_-]+$").expect("session name pattern is valid");
}

/// A session name matching `^[A-Za-z0-9_-]+$`, without the tool prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionName(String);

impl SessionName {
    pub fn parse(name: &str) -> Result<Self, SessionError> {
        if NAME_PATTERN.is_match(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(SessionError::InvalidName(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
