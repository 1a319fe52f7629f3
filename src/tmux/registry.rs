// ABOUTME: Query and mutate the remote tmux session table
// Nothing is cached: every call re-reads the host, which stays the single source of truth

use tracing::{debug, info, warn};

use super::commands::{self, full_name, AGENT_SOCKET_VAR, PREFIX};
use super::palette::colour_for;
use super::TmuxError;
use crate::models::{Session, SessionState};
use crate::relay::CredentialRelay;
use crate::remote::{RemoteChannel, RemoteOutput};

/// Parse `name:attachedCount` lines into prefixed sessions, sorted by name.
///
/// Foreign sessions and lines that don't parse (login banners, MOTD noise)
/// are skipped.
pub fn parse_listing(stdout: &str) -> Vec<Session> {
    let mut sessions: Vec<Session> = stdout
        .lines()
        .map(str::trim)
        .filter_map(|line| {
            let (name, count) = line.rsplit_once(':')?;
            let count: u32 = count.trim().parse().ok()?;
            let name = name.strip_prefix(PREFIX)?;
            if name.is_empty() {
                return None;
            }
            Some(Session::new(name, count != 0))
        })
        .collect();
    sessions.sort();
    sessions
}

pub struct SessionRegistry<'a, R: RemoteChannel + ?Sized> {
    channel: &'a R,
    host: &'a str,
}

impl<'a, R: RemoteChannel + ?Sized> SessionRegistry<'a, R> {
    pub fn new(channel: &'a R, host: &'a str) -> Self {
        Self { channel, host }
    }

    async fn run(&self, command: &str) -> Result<RemoteOutput, TmuxError> {
        Ok(self.channel.run(self.host, command).await?)
    }

    async fn run_checked(&self, command: &str) -> Result<RemoteOutput, TmuxError> {
        let output = self.run(command).await?;
        if !output.success() {
            return Err(TmuxError::CommandFailed {
                command: command.to_string(),
                code: output.exit_code,
            });
        }
        Ok(output)
    }

    /// All sessions carrying the prefix, prefix stripped, sorted by name.
    ///
    /// The listing swallows a missing tmux server, so a non-zero exit here
    /// comes from the transport (ssh exits 255) and is never an empty table.
    pub async fn list(&self) -> Result<Vec<Session>, TmuxError> {
        let output = self.run_checked(&commands::list_sessions()).await?;
        let sessions = parse_listing(&output.stdout);
        debug!("Listed {} session(s) on {}", sessions.len(), self.host);
        Ok(sessions)
    }

    /// Return the state `name` was in before this call, creating it detached
    /// when it was `Absent`. Existing sessions are not touched.
    pub async fn create_or_get(
        &self,
        name: &str,
        relay: &CredentialRelay,
    ) -> Result<SessionState, TmuxError> {
        let sessions = self.list().await?;
        let state = Session::state_in(&sessions, name);
        if state != SessionState::Absent {
            return Ok(state);
        }

        let full = full_name(name);
        let alias = relay.session_alias(name);
        let env = alias.as_deref().map(|path| (AGENT_SOCKET_VAR, path));
        self.run_checked(&commands::new_session(&full, env)).await?;
        info!("Created session {} on {}", full, self.host);

        let colour = colour_for(name);
        match self.run(&commands::set_status_style(&full, colour)).await {
            Ok(output) if output.success() => {}
            Ok(output) => warn!(
                "Setting status colour for {} exited with {}",
                full, output.exit_code
            ),
            Err(e) => warn!("Setting status colour for {} failed: {}", full, e),
        }

        Ok(SessionState::Absent)
    }

    pub async fn kill(&self, name: &str) -> Result<(), TmuxError> {
        let output = self.run(&commands::kill_session(&full_name(name))).await?;
        if !output.success() {
            return Err(TmuxError::SessionNotFound(name.to_string()));
        }
        info!("Killed session {}{} on {}", PREFIX, name, self.host);
        Ok(())
    }

    /// Detach every client from the session; the session itself keeps running.
    pub async fn detach(&self, name: &str) -> Result<(), TmuxError> {
        self.run_checked(&commands::detach_client(&full_name(name)))
            .await?;
        info!("Detached session {}{} on {}", PREFIX, name, self.host);
        Ok(())
    }
}
