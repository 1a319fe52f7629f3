// ABOUTME: Tests for querying and mutating the remote tmux session table
// Verifies exactly which remote commands each registry call issues

mod common;

use common::{ScriptedChannel, HOST};
use pretty_assertions::assert_eq;
use resume::models::{Session, SessionState};
use resume::relay::CredentialRelay;
use resume::remote::RemoteError;
use resume::tmux::{SessionRegistry, TmuxError};

#[tokio::test]
async fn test_list_filters_sorts_and_strips_prefix() {
    let channel = ScriptedChannel::with_listing("resume-web:0\nresume-api:1\nother:0\n");
    let registry = SessionRegistry::new(&channel, HOST);

    let sessions = registry.list().await.unwrap();

    assert_eq!(
        sessions,
        vec![Session::new("api", true), Session::new("web", false)]
    );
    assert_eq!(channel.commands().len(), 1);
}

#[tokio::test]
async fn test_creates_new_session() {
    let channel = ScriptedChannel::with_listing("");
    let registry = SessionRegistry::new(&channel, HOST);

    let prior = registry
        .create_or_get("web", &CredentialRelay::new(false))
        .await
        .unwrap();

    assert_eq!(
        prior,
        SessionState::Absent
    );
    let commands = channel.commands();
    assert_eq!(commands.len(), 3);
    assert!(commands[1].contains("new-session"));
    assert!(commands[1].contains("resume-web"));
    assert!(!commands[1].contains("SSH_AUTH_SOCK"));
    assert!(commands[2].contains("set"));
    assert!(commands[2].contains("status-style"));
}

#[tokio::test]
async fn test_new_session_seeds_relay_alias_when_forwarding() {
    let channel = ScriptedChannel::with_listing("");
    let registry = SessionRegistry::new(&channel, HOST);

    registry
        .create_or_get("web", &CredentialRelay::new(true))
        .await
        .unwrap();

    assert_eq!(
        channel.commands()[1],
        "tmux new-session -d -s resume-web -e SSH_AUTH_SOCK=/tmp/resume/resume-web.sock"
    );
    assert_eq!(channel.commands().len(), 3);
}

#[tokio::test]
async fn test_existing_detached_session() {
    let channel = ScriptedChannel::with_listing("resume-web:0\n");
    let registry = SessionRegistry::new(&channel, HOST);

    let prior = registry
        .create_or_get("web", &CredentialRelay::new(false))
        .await
        .unwrap();

    assert_eq!(
        prior,
        SessionState::Detached
    );
    assert_eq!(channel.commands().len(), 1);
}

#[tokio::test]
async fn test_existing_attached_session_issues_no_mutation() {
    let channel = ScriptedChannel::with_listing("resume-web:1\n");
    let registry = SessionRegistry::new(&channel, HOST);

    let prior = registry
        .create_or_get("web", &CredentialRelay::new(true))
        .await
        .unwrap();

    assert_eq!(
        prior,
        SessionState::Attached
    );
    assert_eq!(channel.commands().len(), 1);
}

#[tokio::test]
async fn test_similar_names_do_not_match() {
    let channel = ScriptedChannel::with_listing("resume-web2:1\n");
    let registry = SessionRegistry::new(&channel, HOST);

    let prior = registry
        .create_or_get("web", &CredentialRelay::new(false))
        .await
        .unwrap();

    assert_eq!(prior, SessionState::Absent);
    assert_eq!(channel.count("new-session -d -s resume-web"), 1);
}

#[tokio::test]
async fn test_failed_create_is_an_error() {
    let channel = ScriptedChannel::with_listing("").fail_when("new-session", 1);
    let registry = SessionRegistry::new(&channel, HOST);

    let result = registry
        .create_or_get("web", &CredentialRelay::new(false))
        .await;

    assert!(matches!(result, Err(TmuxError::CommandFailed { code: 1, .. })));
    assert_eq!(channel.count("status-style"), 0);
}

#[tokio::test]
async fn test_failed_colour_is_cosmetic() {
    let channel = ScriptedChannel::with_listing("").fail_when("status-style", 1);
    let registry = SessionRegistry::new(&channel, HOST);

    let result = registry
        .create_or_get("web", &CredentialRelay::new(false))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_kill_nonzero_is_not_found() {
    let channel = ScriptedChannel::default().fail_when("kill-session", 1);
    let registry = SessionRegistry::new(&channel, HOST);

    let result = registry.kill("nope").await;

    match result {
        Err(e @ TmuxError::SessionNotFound(_)) => {
            assert_eq!(e.to_string(), "Session 'nope' not found on remote.");
        }
        other => panic!("expected SessionNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_detach_targets_session_clients() {
    let channel = ScriptedChannel::default();
    let registry = SessionRegistry::new(&channel, HOST);

    registry.detach("api").await.unwrap();

    assert_eq!(channel.commands(), vec![r"tmux detach-client -s \=resume-api"]);
}

#[tokio::test]
async fn test_kill_uses_exact_target() {
    let channel = ScriptedChannel::with_listing("resume-web2:0\n");
    let registry = SessionRegistry::new(&channel, HOST);

    registry.kill("web").await.unwrap();

    let words = shlex::split(&channel.commands()[0]).unwrap();
    assert_eq!(words, vec!["tmux", "kill-session", "-t", "=resume-web"]);
}

#[tokio::test]
async fn test_unreachable_host_is_not_an_empty_listing() {
    let channel = ScriptedChannel::with_listing("").listing_exits(255);
    let registry = SessionRegistry::new(&channel, HOST);

    let result = registry.list().await;

    assert!(matches!(result, Err(TmuxError::CommandFailed { code: 255, .. })));
}

#[tokio::test]
async fn test_failed_listing_never_creates() {
    let channel = ScriptedChannel::with_listing("").listing_exits(255);
    let registry = SessionRegistry::new(&channel, HOST);

    let result = registry
        .create_or_get("web", &CredentialRelay::new(false))
        .await;

    assert!(result.is_err());
    assert_eq!(channel.count("new-session"), 0);
}

#[tokio::test]
async fn test_transport_error_propagates() {
    let channel = ScriptedChannel::with_listing("resume-web:0\n").disconnected();
    let registry = SessionRegistry::new(&channel, HOST);

    let result = registry.list().await;

    assert!(matches!(
        result,
        Err(TmuxError::Remote(RemoteError::Timeout { secs: 5, .. }))
    ));
}
