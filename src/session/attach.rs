// ABOUTME: Builds the command a local window runs to attach to a remote session
// With forwarding on, the relay alias is refreshed in the same login shell before attaching

use super::SessionName;
use crate::relay::CredentialRelay;
use crate::tmux::commands::{self, quote};
use crate::tmux::full_name;

/// `ssh -t [-A] <host> '$SHELL -lc "<relay refresh>tmux attach -t \=resume-<name>"'`
///
/// Runs in the user's local shell, so `$SSH_AUTH_SOCK` and `$SHELL` stay
/// literal here and expand on the remote side.
pub fn attach_command(host: &str, name: &SessionName, relay: &CredentialRelay) -> String {
    format!(
        "ssh -t{} {} '$SHELL -lc \"{}{}\"'",
        relay.ssh_flag(),
        quote(host),
        relay.refresh_script(name),
        commands::attach(&full_name(name.as_str()))
    )
}
