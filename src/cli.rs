// ABOUTME: Command-line surface: argument parsing, option exclusivity, and result rendering
// Kept in the library so every user-visible message is testable without a terminal

use std::io::Write;

use clap::Parser;
use crossterm::style::Stylize;
use thiserror::Error;

use crate::models::SessionState;
use crate::remote::RemoteChannel;
use crate::session::{BatchReport, Resolution, SessionController, SessionError};
use crate::terminal::WindowManager;

#[derive(Parser, Debug, Default)]
#[command(
    name = "resume",
    version,
    about = "Manage tmux sessions on a remote VM with Terminal.app windows.",
    after_help = "Pass a NAME or an option, not both. With no arguments, every detached session is resumed."
)]
pub struct Cli {
    /// Session name to create/attach
    pub name: Option<String>,

    /// Configure SSH host
    #[arg(short, long)]
    pub setup: bool,

    /// List active sessions
    #[arg(short, long)]
    pub list: bool,

    /// Remove a session
    #[arg(short, long, value_name = "NAME")]
    pub remove: Option<String>,

    /// Detach all sessions and close resume windows
    #[arg(short, long)]
    pub detach: bool,

    /// Kill all sessions and close resume windows
    #[arg(short, long)]
    pub clear: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Setup,
    List,
    Remove(String),
    DetachAll,
    ClearAll,
    Resolve(String),
    ResumeAll,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("Cannot combine a session name with options.")]
    NameWithOption,

    #[error("Only one option may be used at a time.")]
    MultipleOptions,
}

impl Cli {
    /// The single action requested, or why the combination is invalid.
    pub fn action(&self) -> Result<Action, UsageError> {
        let flags = [
            self.setup,
            self.list,
            self.remove.is_some(),
            self.detach,
            self.clear,
        ]
        .iter()
        .filter(|set| **set)
        .count();

        if self.name.is_some() && flags > 0 {
            return Err(UsageError::NameWithOption);
        }
        if flags > 1 {
            return Err(UsageError::MultipleOptions);
        }

        Ok(if self.setup {
            Action::Setup
        } else if self.list {
            Action::List
        } else if let Some(name) = &self.remove {
            Action::Remove(name.clone())
        } else if self.detach {
            Action::DetachAll
        } else if self.clear {
            Action::ClearAll
        } else if let Some(name) = &self.name {
            Action::Resolve(name.clone())
        } else {
            Action::ResumeAll
        })
    }
}

fn write_failures<O: Write>(out: &mut O, report: &BatchReport) -> std::io::Result<()> {
    for failure in &report.failures {
        writeln!(out, "  {} {}: {}", "✗".red(), failure.name, failure.error)?;
    }
    for error in &report.cleanup_errors {
        writeln!(out, "{} {}", "Cleanup failed:".red(), error)?;
    }
    Ok(())
}

fn write_batch<O: Write>(
    out: &mut O,
    report: &BatchReport,
    headline: impl Fn(usize, String) -> String,
    empty: &str,
) -> std::io::Result<()> {
    if report.is_empty() {
        writeln!(out, "{}", empty.yellow())?;
    } else if !report.completed.is_empty() {
        writeln!(
            out,
            "{}",
            headline(report.completed.len(), report.completed.join(", "))
        )?;
    }
    write_failures(out, report)
}

/// Run a session action and render its outcome to `out`.
///
/// Returns whether everything succeeded; batch operations that partially
/// failed still render their successes before reporting `false`.
pub async fn execute<R, W, O>(
    action: &Action,
    controller: &SessionController<R, W>,
    out: &mut O,
) -> Result<bool, SessionError>
where
    R: RemoteChannel,
    W: WindowManager,
    O: Write,
{
    match action {
        // Needs no host; the binary handles it before a controller exists
        Action::Setup => Ok(true),
        Action::List => {
            let sessions = controller.overview().await?;
            if sessions.is_empty() {
                writeln!(out, "{}", "No sessions.".yellow())?;
                return Ok(true);
            }
            writeln!(out, "{}", "Sessions:".bold())?;
            for entry in &sessions {
                let state = entry.session.state();
                let status = match state {
                    SessionState::Attached => state.label().green(),
                    _ => state.label().dim(),
                };
                let note = if entry.is_orphaned() {
                    "  (no local window)".dim().to_string()
                } else {
                    String::new()
                };
                writeln!(out, "  {}  {}{}", entry.session.name.as_str().cyan(), status, note)?;
            }
            Ok(true)
        }
        Action::Remove(name) => {
            controller.remove(name).await?;
            writeln!(out, "{} {}", "Removed session:".red(), name)?;
            Ok(true)
        }
        Action::DetachAll => {
            let report = controller.detach_all().await?;
            write_batch(
                out,
                &report,
                |n, names| format!("{} {}", format!("Detached {} session(s):", n).yellow(), names),
                "No attached sessions.",
            )?;
            Ok(report.is_success())
        }
        Action::ClearAll => {
            let report = controller.clear_all().await?;
            write_batch(
                out,
                &report,
                |n, names| format!("{} {}", format!("Killed {} session(s):", n).red(), names),
                "No sessions.",
            )?;
            Ok(report.is_success())
        }
        Action::Resolve(name) => {
            let message = match controller.resolve(name).await? {
                Resolution::Created => format!("Created and attached session '{}'.", name).green(),
                Resolution::Resumed => format!("Resuming existing session '{}'.", name).green(),
                Resolution::AlreadyAttached => {
                    format!("Session '{}' is already attached.", name).yellow()
                }
            };
            writeln!(out, "{}", message)?;
            Ok(true)
        }
        Action::ResumeAll => {
            let report = controller.resume_all().await?;
            write_batch(
                out,
                &report,
                |n, names| format!("{} {}", format!("Resumed {} session(s):", n).green(), names),
                "No detached sessions to resume.",
            )?;
            Ok(report.is_success())
        }
    }
}
