//! Run orchestration: enumerate, probe, select, dispatch
//!
//! [`Launcher`] owns the collaborators for one run. The binary calls
//! [`Launcher::probe`] and then either prints the records (`--list`) or
//! hands them to [`Launcher::present_and_dispatch`].

use std::sync::Arc;

use drawer_core::prelude::*;
use drawer_core::{format_block, parse_line, ProbeRecord};
use drawer_probe::{list_packages, probe_all, ToolRunner};

use crate::config::RunConfig;
use crate::dispatch::{DispatchOutcome, Dispatcher};
use crate::selector::Selector;

/// Records from a probe run plus any non-fatal warnings raised on the way
#[derive(Debug, Clone, Default)]
pub struct ProbeRun {
    /// Sorted by label, case-insensitively
    pub records: Vec<ProbeRecord>,
    pub warnings: Vec<String>,
}

pub struct Launcher<R, S> {
    runner: Arc<R>,
    selector: S,
    config: RunConfig,
    dispatcher: Dispatcher,
}

impl<R, S> Launcher<R, S>
where
    R: ToolRunner + Send + Sync + 'static,
    S: Selector,
{
    pub fn new(runner: Arc<R>, selector: S, config: RunConfig) -> Self {
        let dispatcher = Dispatcher::from_config(&config);
        Self {
            runner,
            selector,
            config,
            dispatcher,
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn selector(&self) -> &S {
        &self.selector
    }

    /// Enumerate packages and resolve every one of them.
    ///
    /// An empty package list is [`Error::NoPackages`]; the pool is never
    /// started in that case.
    pub async fn probe(&self) -> Result<ProbeRun> {
        let listing = list_packages(self.runner.as_ref(), &self.config.commands).await;

        if listing.packages.is_empty() {
            error!("No packages to probe");
            return Err(Error::NoPackages);
        }

        let records = probe_all(
            Arc::clone(&self.runner),
            Arc::new(self.config.commands.clone()),
            listing.packages,
            self.config.pool,
        )
        .await;

        Ok(ProbeRun {
            records,
            warnings: listing.warning.into_iter().collect(),
        })
    }

    /// Show `records` in the selector and act on the chosen line
    pub async fn present_and_dispatch(&self, records: &[ProbeRecord]) -> Result<DispatchOutcome> {
        if records.is_empty() {
            return Err(Error::NoPackages);
        }

        let block = format_block(records);
        let chosen = self.selector.select(&block).await?;
        debug!("Selected: {:?}", chosen);

        let selection = parse_line(&chosen)?;
        self.dispatcher.dispatch(self.runner.as_ref(), &selection).await
    }

    /// Probe, then select and dispatch. Warnings are returned alongside the
    /// outcome for the caller to print.
    pub async fn run(&self) -> Result<(DispatchOutcome, Vec<String>)> {
        let probe = self.probe().await?;
        let outcome = self.present_and_dispatch(&probe.records).await?;
        Ok((outcome, probe.warnings))
    }
}
