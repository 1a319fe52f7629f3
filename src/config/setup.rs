// ABOUTME: Interactive setup prompting for the ssh host and agent forwarding
// Empty answers keep the current values so re-running setup is non-destructive

use std::io::{BufRead, Write};

use thiserror::Error;
use tracing::info;

use super::{Config, ConfigError, ConfigStore};

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("No host provided.")]
    NoHost,

    #[error("Failed to read answer: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> std::io::Result<String> {
    write!(output, "{}", prompt)?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

/// Prompt for the host and forwarding flag, then persist the result.
pub fn run_setup<R: BufRead, W: Write>(
    store: &ConfigStore,
    input: &mut R,
    output: &mut W,
) -> Result<Config, SetupError> {
    let mut config = store.load()?;

    let current_host = config.host().map(String::from);
    let prompt = match &current_host {
        Some(current) => format!("SSH host [{}]: ", current),
        None => "SSH host (e.g. user@hostname): ".to_string(),
    };
    let answer = ask(input, output, &prompt)?;
    let host = if answer.is_empty() {
        current_host.ok_or(SetupError::NoHost)?
    } else {
        answer
    };
    config.remote_host = Some(host);

    let default = if config.forwarding_enabled { "Y/n" } else { "y/N" };
    let answer = ask(
        input,
        output,
        &format!("Enable SSH agent forwarding (-A)? [{}]: ", default),
    )?;
    match answer.to_lowercase().as_str() {
        "y" | "yes" => config.forwarding_enabled = true,
        "n" | "no" => config.forwarding_enabled = false,
        _ => {}
    }

    store.save(&config)?;
    info!(
        "Saved setup: host={:?} forwarding={}",
        config.remote_host, config.forwarding_enabled
    );
    Ok(config)
}
