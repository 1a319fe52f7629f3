// ABOUTME: Terminal.app automation through osascript
// Opens titled windows for attach commands and closes them by custom title

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use super::{TitleMatch, WindowError, WindowManager};

/// Escape a string for embedding in an AppleScript string literal.
pub fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

pub fn open_script(title: &str, command: &str) -> String {
    format!(
        "tell application \"Terminal\"\n    do script \"{}\"\n    set custom title of selected tab of front window to \"{}\"\nend tell",
        escape(command),
        escape(title)
    )
}

fn condition(pattern: &TitleMatch) -> String {
    match pattern {
        TitleMatch::Exact(title) => format!("custom title of t is \"{}\"", escape(title)),
        TitleMatch::Prefix(prefix) => {
            format!("custom title of t starts with \"{}\"", escape(prefix))
        }
    }
}

/// Two passes: send `exit` so the remote client disconnects cleanly, give the
/// shells a moment, then force-close whatever is still open.
pub fn close_script(pattern: &TitleMatch) -> String {
    let condition = condition(pattern);
    format!(
        r#"
tell application "Terminal"
    repeat with i from (count windows) to 1 by -1
        try
            set w to window i
            repeat with t in tabs of w
                if {condition} then
                    do script "exit" in t
                    exit repeat
                end if
            end repeat
        end try
    end repeat

    delay 0.5

    repeat with i from (count windows) to 1 by -1
        try
            set w to window i
            repeat with t in tabs of w
                if {condition} then
                    close w saving no
                    exit repeat
                end if
            end repeat
        end try
    end repeat
end tell
"#,
        condition = condition
    )
}

pub fn list_titles_script() -> String {
    r#"
set output to ""
tell application "Terminal"
    repeat with w in windows
        try
            repeat with t in tabs of w
                set output to output & (custom title of t) & linefeed
            end repeat
        end try
    end repeat
end tell
return output
"#
    .to_string()
}

#[derive(Debug, Clone, Default)]
pub struct AppleTerminal;

impl AppleTerminal {
    pub fn new() -> Self {
        Self
    }

    async fn osascript(&self, script: &str) -> Result<String, WindowError> {
        let output = Command::new("osascript").args(["-e", script]).output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("osascript failed: {}", stderr);
            return Err(WindowError::AutomationFailed(stderr));
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[async_trait]
impl WindowManager for AppleTerminal {
    async fn open(&self, title: &str, command: &str) -> Result<(), WindowError> {
        debug!("Opening Terminal window {}", title);
        self.osascript(&open_script(title, command)).await?;
        Ok(())
    }

    async fn find_by_title(&self, pattern: &TitleMatch) -> Result<Vec<String>, WindowError> {
        let output = self.osascript(&list_titles_script()).await?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|title| pattern.matches(title))
            .map(String::from)
            .collect())
    }

    async fn close_by_title(&self, pattern: &TitleMatch) -> Result<(), WindowError> {
        debug!("Closing Terminal windows matching {:?}", pattern);
        self.osascript(&close_script(pattern)).await?;
        Ok(())
    }
}
