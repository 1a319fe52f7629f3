// ABOUTME: Main entry point for the resume command-line tool

use std::io;
use std::process;

use anyhow::Result;
use clap::Parser;
use crossterm::style::Stylize;

use resume::cli::{self, Action, Cli};
use resume::config::{self, ConfigStore};
use resume::remote::SshChannel;
use resume::session::{SessionController, SessionError};
use resume::terminal::AppleTerminal;

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version are not misuse
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    let code = match run(cli).await {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            report_error(&e);
            1
        }
    };
    process::exit(code);
}

async fn run(cli: Cli) -> Result<bool> {
    let action = cli.action()?;
    let store = ConfigStore::default_location()?;

    if action == Action::Setup {
        let stdin = io::stdin();
        let config = config::run_setup(&store, &mut stdin.lock(), &mut io::stdout())?;
        println!(
            "{} {}",
            "Saved SSH host:".green(),
            config.host().unwrap_or_default()
        );
        let status = if config.forwarding_enabled { "enabled" } else { "disabled" };
        println!("{} {}", "SSH agent forwarding:".green(), status);
        return Ok(true);
    }

    let config = store.load()?;
    let channel = SshChannel::with_timeout(config.command_timeout());
    let controller = SessionController::from_config(&config, channel, AppleTerminal::new())?;
    tracing::info!("Running {:?} against {}", action, controller.host());

    Ok(cli::execute(&action, &controller, &mut io::stdout()).await?)
}

fn report_error(error: &anyhow::Error) {
    tracing::error!("{:#}", error);
    eprintln!("{}", format!("{:#}", error).red());
    if let Some(hint) = error.downcast_ref::<SessionError>().and_then(SessionError::hint) {
        eprintln!("{}", hint);
    }
}

fn setup_logging() {
    use std::fs::OpenOptions;
    use std::path::PathBuf;
    use tracing_subscriber::prelude::*;

    let log_dir = dirs::home_dir()
        .map(|home| config::store::config_dir(&home).join("logs"))
        .unwrap_or_else(|| PathBuf::from(".resume/logs"));

    if std::fs::create_dir_all(&log_dir).is_err() {
        return;
    }

    // One file per day, appended to by every invocation
    let log_file = log_dir.join(format!("resume-{}.log", chrono::Local::now().format("%Y%m%d")));

    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_file) else {
        return;
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_env("RESUME_LOG")
                .unwrap_or_else(|_| "resume=info".into()),
        )
        .init();
}
