// ABOUTME: Session data model representing one prefixed tmux session on the remote host
// The host is the only source of truth; these values are snapshots from a single listing

/// Lifecycle position of a session name on the remote host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Absent,
    Detached,
    Attached,
}

impl SessionState {
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Absent => "absent",
            SessionState::Detached => "detached",
            SessionState::Attached => "attached",
        }
    }
}

/// A row from the remote session table with the tool prefix already stripped.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Session {
    pub name: String,
    pub attached: bool,
}

impl Session {
    pub fn new(name: impl Into<String>, attached: bool) -> Self {
        Self {
            name: name.into(),
            attached,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.attached {
            SessionState::Attached
        } else {
            SessionState::Detached
        }
    }

    /// State of `name` within a listing snapshot.
    pub fn state_in(sessions: &[Session], name: &str) -> SessionState {
        sessions
            .iter()
            .find(|s| s.name == name)
            .map_or(SessionState::Absent, Session::state)
    }
}
