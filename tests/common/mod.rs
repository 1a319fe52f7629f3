// ABOUTME: Shared test doubles for driving the session controller without ssh or Terminal.app
// ScriptedChannel records every remote command; MockWindows is a mockall window collaborator

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockall::mock;

use resume::relay::CredentialRelay;
use resume::remote::{RemoteChannel, RemoteError, RemoteOutput};
use resume::session::SessionController;
use resume::terminal::{TitleMatch, WindowError, WindowManager};

pub const HOST: &str = "user@host";

#[derive(Default)]
struct Script {
    listing: String,
    listing_code: i32,
    disconnected: bool,
    resolve_targets: bool,
    failures: Vec<(String, i32)>,
    commands: Vec<String>,
}

/// In-memory remote host: answers listings from a fixed table, fails
/// commands containing configured substrings, and can drop the connection.
#[derive(Clone, Default)]
pub struct ScriptedChannel {
    script: Arc<Mutex<Script>>,
}

impl ScriptedChannel {
    pub fn with_listing(listing: &str) -> Self {
        let channel = Self::default();
        channel.script.lock().unwrap().listing = listing.to_string();
        channel
    }

    /// Any command containing `needle` exits with `code`.
    pub fn fail_when(self, needle: &str, code: i32) -> Self {
        self.script
            .lock()
            .unwrap()
            .failures
            .push((needle.to_string(), code));
        self
    }

    /// The listing itself exits with `code`, as ssh does (255) when the host is unreachable.
    pub fn listing_exits(self, code: i32) -> Self {
        self.script.lock().unwrap().listing_code = code;
        self
    }

    /// Every command fails in transport before reaching the host.
    pub fn disconnected(self) -> Self {
        self.script.lock().unwrap().disconnected = true;
        self
    }

    /// Resolve `-t`/`-s` targets against the listing the way tmux does:
    /// `=name` matches exactly, a bare name matches itself or a unique prefix.
    /// Commands whose target resolves to nothing exit 1.
    pub fn resolving_targets(self) -> Self {
        self.script.lock().unwrap().resolve_targets = true;
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.script.lock().unwrap().commands.clone()
    }

    pub fn count(&self, needle: &str) -> usize {
        self.commands().iter().filter(|c| c.contains(needle)).count()
    }
}

#[async_trait]
impl RemoteChannel for ScriptedChannel {
    async fn run(&self, host: &str, command: &str) -> Result<RemoteOutput, RemoteError> {
        assert_eq!(host, HOST);
        let mut script = self.script.lock().unwrap();
        script.commands.push(command.to_string());

        if script.disconnected {
            return Err(RemoteError::Timeout {
                host: host.to_string(),
                secs: 5,
            });
        }
        if command.starts_with("tmux list-sessions") {
            if script.listing_code != 0 {
                return Ok(RemoteOutput::new(script.listing_code, ""));
            }
            return Ok(RemoteOutput::new(0, script.listing.clone()));
        }
        if script.resolve_targets {
            if let Some(target) = target_of(command) {
                let code = if resolves(&script.listing, &target) { 0 } else { 1 };
                return Ok(RemoteOutput::new(code, ""));
            }
        }
        let code = script
            .failures
            .iter()
            .find(|(needle, _)| command.contains(needle.as_str()))
            .map_or(0, |(_, code)| *code);
        Ok(RemoteOutput::new(code, ""))
    }
}

fn target_of(command: &str) -> Option<String> {
    let words = shlex::split(command)?;
    // `new-session -s` names a session rather than targeting one
    if words.get(1).map(String::as_str) == Some("new-session") {
        return None;
    }
    let flag = words.iter().position(|w| w == "-t" || w == "-s")?;
    words.get(flag + 1).cloned()
}

fn resolves(listing: &str, target: &str) -> bool {
    let names: Vec<&str> = listing
        .lines()
        .filter_map(|line| line.rsplit_once(':').map(|(name, _)| name))
        .collect();
    if let Some(exact) = target.strip_prefix('=') {
        return names.contains(&exact);
    }
    names.contains(&target) || names.iter().filter(|n| n.starts_with(target)).count() == 1
}

mock! {
    pub Windows {}

    #[async_trait]
    impl WindowManager for Windows {
        async fn open(&self, title: &str, command: &str) -> Result<(), WindowError>;
        async fn find_by_title(&self, pattern: &TitleMatch) -> Result<Vec<String>, WindowError>;
        async fn close_by_title(&self, pattern: &TitleMatch) -> Result<(), WindowError>;
    }
}

pub fn all_windows() -> TitleMatch {
    TitleMatch::Prefix("resume-".to_string())
}

pub fn controller(
    channel: &ScriptedChannel,
    windows: MockWindows,
    forwarding: bool,
) -> SessionController<ScriptedChannel, MockWindows> {
    SessionController::new(
        HOST,
        CredentialRelay::new(forwarding),
        channel.clone(),
        windows,
    )
}
