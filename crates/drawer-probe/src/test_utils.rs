//! Test utilities for probing
//!
//! Provides a scripted [`ToolRunner`] and record builders so the pipeline can
//! be exercised without an Android device.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::{sleep_until, Instant};

use drawer_core::{EntryPoint, ProbeRecord};

use crate::tool::{Invocation, ToolOutput, ToolRunner};

/// One call observed by [`ScriptedRunner`]
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub invocation: Invocation,
    pub had_deadline: bool,
}

#[derive(Debug, Clone)]
struct ScriptedResponse {
    output: ToolOutput,
    delay: Duration,
}

/// A [`ToolRunner`] that answers from a script instead of spawning processes.
///
/// Unscripted invocations fail with empty output, like a tool that printed
/// nothing. Delays honor the caller's deadline: a response due after the
/// deadline comes back as a failure at the deadline.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: HashMap<String, ScriptedResponse>,
    default_delay: Duration,
    calls: Mutex<Vec<RecordedCall>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `invocation` immediately with `output`
    pub fn respond(self, invocation: &Invocation, output: ToolOutput) -> Self {
        self.respond_after(invocation, output, Duration::ZERO)
    }

    /// Answer `invocation` with `output` after `delay`
    pub fn respond_after(
        mut self,
        invocation: &Invocation,
        output: ToolOutput,
        delay: Duration,
    ) -> Self {
        self.responses
            .insert(invocation.to_string(), ScriptedResponse { output, delay });
        self
    }

    /// Delay applied to unscripted invocations
    pub fn with_default_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    /// Calls seen so far, in arrival order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Highest number of calls that were running at the same time
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl ToolRunner for ScriptedRunner {
    async fn run(&self, invocation: &Invocation, deadline: Option<Instant>) -> ToolOutput {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(RecordedCall {
                invocation: invocation.clone(),
                had_deadline: deadline.is_some(),
            });

        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        let (output, delay) = match self.responses.get(&invocation.to_string()) {
            Some(scripted) => (scripted.output.clone(), scripted.delay),
            None => (ToolOutput::failure(""), self.default_delay),
        };

        let output = if delay.is_zero() {
            output
        } else {
            let ready_at = Instant::now() + delay;
            match deadline {
                Some(deadline) if deadline < ready_at => {
                    sleep_until(deadline).await;
                    ToolOutput::failure("")
                }
                _ => {
                    sleep_until(ready_at).await;
                    output
                }
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        output
    }
}

/// Creates a record with a resolved label and launcher activity.
pub fn test_record(label: &str, identifier: &str, activity: &str) -> ProbeRecord {
    ProbeRecord::new(
        identifier,
        Some(label.to_string()),
        EntryPoint::component(activity),
    )
}

/// Creates a record whose entry point could not be resolved.
pub fn test_record_unlaunchable(label: &str, identifier: &str) -> ProbeRecord {
    ProbeRecord::new(identifier, Some(label.to_string()), EntryPoint::Unknown)
}
