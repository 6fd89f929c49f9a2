//! Interactive selection through an external fuzzy finder
//!
//! The exchange block goes to the selector's stdin and the chosen line comes
//! back on its stdout. Its stderr stays attached to the terminal, which is
//! where `fzf` draws its UI.

use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use drawer_core::prelude::*;

use crate::config::SelectorSettings;

/// `fzf` exit status for an internal error (1 is "no match", 130 is abort)
const SELECTOR_ERROR_STATUS: i32 = 2;

/// Present a block of exchange lines and return the one the user picked
#[trait_variant::make(Selector: Send)]
pub trait LocalSelector {
    async fn select(&self, block: &str) -> Result<String>;
}

/// [`Selector`] that runs a configured command such as `fzf`
#[derive(Debug, Clone)]
pub struct CommandSelector {
    command: String,
    args: Vec<String>,
}

impl CommandSelector {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    pub fn from_settings(settings: &SelectorSettings) -> Self {
        Self::new(settings.command.clone(), settings.args.clone())
    }
}

impl Selector for CommandSelector {
    async fn select(&self, block: &str) -> Result<String> {
        debug!("Starting selector: {} {:?}", self.command, self.args);

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => Error::tool_not_found(
                    &self.command,
                    "Install it with: pkg install fzf",
                ),
                _ => Error::tool_spawn(&self.command, e.to_string()),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            let block = block.to_string();
            tokio::spawn(async move {
                // The selector may exit before reading everything
                if let Err(e) = stdin.write_all(block.as_bytes()).await {
                    debug!("Selector closed its input early: {}", e);
                }
            });
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| Error::selector(format!("{} failed: {}", self.command, e)))?;

        if !output.status.success() {
            return match output.status.code() {
                Some(SELECTOR_ERROR_STATUS) => Err(Error::selector(format!(
                    "{} exited with status {}",
                    self.command, SELECTOR_ERROR_STATUS
                ))),
                code => {
                    debug!("Selector exited with {:?}, treating as cancelled", code);
                    Err(Error::SelectionCancelled)
                }
            };
        }

        let chosen = String::from_utf8_lossy(&output.stdout);
        let chosen = chosen.trim_end_matches(['\n', '\r']);
        if chosen.is_empty() {
            return Err(Error::SelectionCancelled);
        }

        Ok(chosen.to_string())
    }
}
