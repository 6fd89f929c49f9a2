//! External tool invocation
//!
//! Every platform lookup goes through [`ToolRunner::run`]: run a command under
//! an optional deadline and hand back whatever it printed plus a pass/fail
//! flag. Callers scan the text even on failure, so this layer never returns
//! an error.

use std::fmt;
use std::process::Stdio;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::time::{timeout_at, Instant};

use drawer_core::prelude::*;

/// A command line to run: program name plus arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Combined output of a finished (or abandoned) tool run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// stdout followed by stderr, trimmed
    pub text: String,
    /// Exited zero before the deadline
    pub succeeded: bool,
}

impl ToolOutput {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            succeeded: true,
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            succeeded: false,
        }
    }
}

/// Runs external tools.
///
/// The pool calls this from many workers at once, so implementations must be
/// shareable across tasks.
#[trait_variant::make(ToolRunner: Send)]
pub trait LocalToolRunner {
    /// Run `invocation`, killing it if `deadline` passes first.
    async fn run(&self, invocation: &Invocation, deadline: Option<Instant>) -> ToolOutput;
}

/// [`ToolRunner`] backed by real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemToolRunner;

impl ToolRunner for SystemToolRunner {
    async fn run(&self, invocation: &Invocation, deadline: Option<Instant>) -> ToolOutput {
        trace!("Running: {}", invocation);

        let mut child = match Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                debug!("Failed to spawn {}: {}", invocation.program, e);
                return ToolOutput::failure(format!(
                    "failed to spawn {}: {}",
                    invocation.program, e
                ));
            }
        };

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let mut stdout_buf = Vec::new();
        let mut stderr_buf = Vec::new();

        let finished = {
            let run = async {
                let (_, _, status) = tokio::join!(
                    drain(stdout, &mut stdout_buf),
                    drain(stderr, &mut stderr_buf),
                    child.wait()
                );
                status
            };

            match deadline {
                Some(deadline) => timeout_at(deadline, run).await.ok(),
                None => Some(run.await),
            }
        };

        let succeeded = match finished {
            Some(Ok(status)) => {
                if !status.success() {
                    debug!("{} exited with {:?}", invocation, status.code());
                }
                status.success()
            }
            Some(Err(e)) => {
                debug!("Error waiting for {}: {}", invocation, e);
                false
            }
            None => {
                debug!("{} hit its deadline, killing it", invocation);
                if let Err(e) = child.kill().await {
                    trace!("Kill after deadline failed for {}: {}", invocation, e);
                }
                false
            }
        };

        ToolOutput {
            text: combine_output(&stdout_buf, &stderr_buf),
            succeeded,
        }
    }
}

/// Read a pipe to EOF in chunks so an abandoned read keeps what arrived
async fn drain<R: AsyncRead + Unpin>(reader: Option<R>, buf: &mut Vec<u8>) {
    let Some(mut reader) = reader else {
        return;
    };

    let mut chunk = [0u8; 4096];
    loop {
        match reader.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
}

fn combine_output(stdout: &[u8], stderr: &[u8]) -> String {
    let stdout = String::from_utf8_lossy(stdout);
    let stderr = String::from_utf8_lossy(stderr);
    format!("{}\n{}", stdout.trim(), stderr.trim())
        .trim()
        .to_string()
}
