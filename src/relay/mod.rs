// ABOUTME: Credential relay keeping a forwarded ssh agent usable across reconnects
// Each session sees a stable per-session socket alias that is re-pointed on every attach

use tracing::{debug, warn};

use crate::remote::RemoteChannel;
use crate::session::SessionName;
use crate::tmux::commands::{self, full_name, quote, AGENT_SOCKET_VAR};
use crate::tmux::TmuxError;

/// Remote directory holding every alias; removed wholesale on clear.
pub const RELAY_DIR: &str = "/tmp/resume";

/// Alias location for one session, e.g. `/tmp/resume/resume-web.sock`.
pub fn alias_path(name: &str) -> String {
    format!("{}/{}.sock", RELAY_DIR, full_name(name))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CredentialRelay {
    enabled: bool,
}

impl CredentialRelay {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Alias to seed into a new session's environment, when forwarding is on.
    ///
    /// The raw agent path changes with every connection; the alias does not.
    pub fn session_alias(&self, name: &str) -> Option<String> {
        self.enabled.then(|| alias_path(name))
    }

    /// Extra flag for the interactive ssh that hosts the attached client.
    pub fn ssh_flag(&self) -> &'static str {
        if self.enabled {
            " -A"
        } else {
            ""
        }
    }

    /// Remote shell prefix, run right before attaching, that re-points the
    /// alias at this connection's live agent socket and rebinds the
    /// session environment. Empty when forwarding is off.
    ///
    /// Ends with `&& ` so the attach command can be appended directly.
    pub fn refresh_script(&self, name: &SessionName) -> String {
        if !self.enabled {
            return String::new();
        }
        let alias = alias_path(name.as_str());
        format!(
            "mkdir -p {dir} && ln -sf ${var} {alias} && export {var}={alias} && {setenv} && ",
            dir = RELAY_DIR,
            var = AGENT_SOCKET_VAR,
            alias = alias,
            setenv = commands::set_environment(&full_name(name.as_str()), AGENT_SOCKET_VAR, &alias),
        )
    }

    pub fn remove_alias_command(name: &str) -> String {
        format!("rm -f {}", quote(&alias_path(name)))
    }

    pub fn clear_command() -> String {
        format!("rm -rf {}", RELAY_DIR)
    }

    /// Delete one session's alias. A missing alias is already the desired end state.
    pub async fn remove_alias<R: RemoteChannel + ?Sized>(
        channel: &R,
        host: &str,
        name: &str,
    ) -> Result<(), TmuxError> {
        let command = Self::remove_alias_command(name);
        let output = channel.run(host, &command).await?;
        if !output.success() {
            return Err(TmuxError::CommandFailed {
                command,
                code: output.exit_code,
            });
        }
        debug!("Removed relay alias for {}", name);
        Ok(())
    }

    /// Sweep the whole relay directory in one command.
    pub async fn clear<R: RemoteChannel + ?Sized>(channel: &R, host: &str) -> Result<(), TmuxError> {
        let command = Self::clear_command();
        let output = channel.run(host, &command).await?;
        if !output.success() {
            warn!("Relay sweep on {} exited with {}", host, output.exit_code);
            return Err(TmuxError::CommandFailed {
                command,
                code: output.exit_code,
            });
        }
        debug!("Removed relay directory on {}", host);
        Ok(())
    }
}
