// ABOUTME: Session lifecycle controller reconciling remote tmux sessions with local windows
// Re-queries the host on every operation; window transitions follow remote ones, never lead

use futures_util::future::join_all;
use tracing::{info, warn};

use super::{attach_command, BatchReport, Resolution, SessionError, SessionName};
use crate::config::Config;
use crate::models::{Session, SessionState};
use crate::relay::CredentialRelay;
use crate::remote::RemoteChannel;
use crate::terminal::{TitleMatch, WindowError, WindowManager};
use crate::tmux::{full_name, SessionRegistry, PREFIX};

/// A listed session plus whether a local window with its title is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOverview {
    pub session: Session,
    /// `None` when the window scan itself failed.
    pub window_open: Option<bool>,
}

impl SessionOverview {
    /// Attached on the host with no local window: the client lives elsewhere
    /// or a window was closed without detaching.
    pub fn is_orphaned(&self) -> bool {
        self.session.attached && self.window_open == Some(false)
    }
}

pub struct SessionController<R, W> {
    host: String,
    relay: CredentialRelay,
    channel: R,
    windows: W,
}

impl<R: RemoteChannel, W: WindowManager> SessionController<R, W> {
    pub fn new(host: impl Into<String>, relay: CredentialRelay, channel: R, windows: W) -> Self {
        Self {
            host: host.into(),
            relay,
            channel,
            windows,
        }
    }

    /// Build from a loaded config; a missing or blank host is `ConfigurationMissing`.
    pub fn from_config(config: &Config, channel: R, windows: W) -> Result<Self, SessionError> {
        let host = config.host().ok_or(SessionError::ConfigurationMissing)?;
        Ok(Self::new(
            host,
            CredentialRelay::new(config.forwarding_enabled),
            channel,
            windows,
        ))
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn relay(&self) -> &CredentialRelay {
        &self.relay
    }

    fn registry(&self) -> SessionRegistry<'_, R> {
        SessionRegistry::new(&self.channel, &self.host)
    }

    async fn open_window(&self, name: &SessionName) -> Result<(), WindowError> {
        let command = attach_command(&self.host, name, &self.relay);
        self.windows
            .open(&full_name(name.as_str()), &command)
            .await
    }

    fn all_windows() -> TitleMatch {
        TitleMatch::Prefix(PREFIX.to_string())
    }

    /// Create the session if needed and open a window attached to it.
    ///
    /// An already-attached session is left alone: no window is opened.
    pub async fn resolve(&self, name: &str) -> Result<Resolution, SessionError> {
        let name = SessionName::parse(name)?;
        let prior = self
            .registry()
            .create_or_get(name.as_str(), &self.relay)
            .await?;

        let resolution = match prior {
            SessionState::Attached => {
                info!("Session {} already attached, not opening a window", name);
                return Ok(Resolution::AlreadyAttached);
            }
            SessionState::Detached => Resolution::Resumed,
            SessionState::Absent => Resolution::Created,
        };

        self.open_window(&name).await?;
        info!("{:?} session {}", resolution, name);
        Ok(resolution)
    }

    /// Open a window for every detached session in the listing.
    ///
    /// Opens run one after another: Terminal titles whichever window is in
    /// front, so overlapping opens could swap titles.
    pub async fn resume_all(&self) -> Result<BatchReport, SessionError> {
        let sessions = self.registry().list().await?;
        let mut report = BatchReport::default();

        for session in sessions.iter().filter(|s| !s.attached) {
            let result = match SessionName::parse(&session.name) {
                Ok(name) => self.open_window(&name).await.map_err(SessionError::from),
                Err(e) => Err(e),
            };
            if let Err(e) = &result {
                warn!("Failed to resume {}: {}", session.name, e);
            }
            report.record(&session.name, result);
        }

        info!(
            "Resumed {} session(s), {} failed",
            report.completed.len(),
            report.failures.len()
        );
        Ok(report)
    }

    /// Kill one session, close its window, and drop its relay alias, in that order.
    ///
    /// Killing first lets the remote client exit before its window is closed.
    pub async fn remove(&self, name: &str) -> Result<(), SessionError> {
        let name = SessionName::parse(name)?;
        self.registry().kill(name.as_str()).await?;

        let closed = self
            .windows
            .close_by_title(&TitleMatch::Exact(full_name(name.as_str())))
            .await;

        // Always attempted: forwarding may have been on when the session was created
        if let Err(e) = CredentialRelay::remove_alias(&self.channel, &self.host, name.as_str()).await {
            warn!("Failed to remove relay alias for {}: {}", name, e);
        }

        closed?;
        info!("Removed session {}", name);
        Ok(())
    }

    /// Detach every attached session, then close every prefixed window.
    ///
    /// Windows are closed even when nothing was attached, which also sweeps
    /// strays left behind by earlier external closures.
    pub async fn detach_all(&self) -> Result<BatchReport, SessionError> {
        let sessions = self.registry().list().await?;
        let attached: Vec<&str> = sessions
            .iter()
            .filter(|s| s.attached)
            .map(|s| s.name.as_str())
            .collect();

        let results = join_all(attached.iter().map(|name| async move {
            let result = self.registry().detach(name).await;
            (*name, result)
        }))
        .await;

        let mut report = BatchReport::default();
        for (name, result) in results {
            if let Err(e) = &result {
                warn!("Failed to detach {}: {}", name, e);
            }
            report.record(name, result.map_err(SessionError::from));
        }

        if let Err(e) = self.windows.close_by_title(&Self::all_windows()).await {
            warn!("Failed to close session windows: {}", e);
            report.cleanup_errors.push(e.into());
        }

        info!(
            "Detached {} session(s), {} failed",
            report.completed.len(),
            report.failures.len()
        );
        Ok(report)
    }

    /// Kill every prefixed session regardless of state, sweep the relay
    /// directory, and close every prefixed window. Irreversible.
    pub async fn clear_all(&self) -> Result<BatchReport, SessionError> {
        let sessions = self.registry().list().await?;

        let results = join_all(sessions.iter().map(|session| async move {
            let result = self.registry().kill(&session.name).await;
            (session.name.as_str(), result)
        }))
        .await;

        let mut report = BatchReport::default();
        for (name, result) in results {
            if let Err(e) = &result {
                warn!("Failed to kill {}: {}", name, e);
            }
            report.record(name, result.map_err(SessionError::from));
        }

        if !sessions.is_empty() {
            if let Err(e) = CredentialRelay::clear(&self.channel, &self.host).await {
                warn!("Failed to clear relay directory: {}", e);
                report.cleanup_errors.push(e.into());
            }
        }

        if let Err(e) = self.windows.close_by_title(&Self::all_windows()).await {
            warn!("Failed to close session windows: {}", e);
            report.cleanup_errors.push(e.into());
        }

        info!(
            "Killed {} session(s), {} failed",
            report.completed.len(),
            report.failures.len()
        );
        Ok(report)
    }

    /// Current listing, unmodified.
    pub async fn list(&self) -> Result<Vec<Session>, SessionError> {
        Ok(self.registry().list().await?)
    }

    /// Listing annotated with local window presence, to surface divergence.
    pub async fn overview(&self) -> Result<Vec<SessionOverview>, SessionError> {
        let sessions = self.list().await?;
        let titles = match self.windows.find_by_title(&Self::all_windows()).await {
            Ok(titles) => Some(titles),
            Err(e) => {
                warn!("Window scan failed: {}", e);
                None
            }
        };

        Ok(sessions
            .into_iter()
            .map(|session| {
                let full = full_name(&session.name);
                let window_open = titles.as_ref().map(|t| t.contains(&full));
                SessionOverview {
                    session,
                    window_open,
                }
            })
            .collect())
    }
}
