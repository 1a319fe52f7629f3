// ABOUTME: tmux command-line shapes used against the remote host
// Every interpolated argument is shell-quoted; name validation upstream is the primary defense

/// Namespace for sessions owned by this tool; anything else on the host is ignored.
pub const PREFIX: &str = "resume-";

/// Variable the credential relay rebinds inside each session.
pub const AGENT_SOCKET_VAR: &str = "SSH_AUTH_SOCK";

pub fn full_name(name: &str) -> String {
    format!("{}{}", PREFIX, name)
}

/// Quote one argument for a POSIX shell. Plain names pass through untouched.
pub fn quote(arg: &str) -> String {
    let cleaned: String = arg.chars().filter(|c| *c != '\0').collect();
    match shlex::try_quote(&cleaned) {
        Ok(quoted) => quoted.into_owned(),
        Err(_) => cleaned,
    }
}

/// Exact-match target for `-t`/`-s`. A bare name would also match any
/// session it is a unique prefix of (`resume-web` hitting `resume-web2`).
///
/// The `=` is backslash-escaped so shells with `=cmd` expansion (zsh) pass it through.
pub fn target(full: &str) -> String {
    format!("\\={}", quote(full))
}

/// Lists every session as `name:attachedCount`; an absent tmux server yields empty output.
pub fn list_sessions() -> String {
    "tmux list-sessions -F '#{session_name}:#{session_attached}' 2>/dev/null || true".to_string()
}

/// Creates a detached session, optionally seeding one environment binding.
pub fn new_session(full: &str, env: Option<(&str, &str)>) -> String {
    let mut cmd = format!("tmux new-session -d -s {}", quote(full));
    if let Some((key, value)) = env {
        cmd.push_str(&format!(" -e {}={}", key, quote(value)));
    }
    cmd
}

pub fn set_status_style(full: &str, colour: &str) -> String {
    format!(
        "tmux set -t {} status-style 'bg={},fg=black'",
        target(full),
        colour
    )
}

pub fn kill_session(full: &str) -> String {
    format!("tmux kill-session -t {}", target(full))
}

pub fn detach_client(full: &str) -> String {
    format!("tmux detach-client -s {}", target(full))
}

pub fn set_environment(full: &str, key: &str, value: &str) -> String {
    format!(
        "tmux set-environment -t {} {} {}",
        target(full),
        key,
        quote(value)
    )
}

pub fn attach(full: &str) -> String {
    format!("tmux attach -t {}", target(full))
}
