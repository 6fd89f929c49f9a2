//! Effective run configuration
//!
//! Command-line overrides win over `config.toml`, which wins over the
//! built-in defaults. The worker count always ends up inside the configured
//! bounds.

use std::time::Duration;

use drawer_probe::{worker_count, PoolOptions, ProbeCommands};

use super::types::{SelectorSettings, Settings};

/// Values given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub timeout_ms: Option<u64>,
    pub workers: Option<usize>,
    pub user: Option<String>,
}

/// Everything one run needs, resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub commands: ProbeCommands,
    pub pool: PoolOptions,
    pub launcher: String,
    pub url_opener: String,
    pub selector: SelectorSettings,
    pub details_url: String,
}

impl RunConfig {
    /// Resolve settings and overrides against the processing-unit count
    pub fn resolve(settings: &Settings, overrides: &Overrides, available_cpus: usize) -> Self {
        let mut commands = settings.probe_commands();
        if let Some(user) = overrides.user.as_ref().filter(|u| !u.trim().is_empty()) {
            commands.user = user.clone();
        }

        let requested = overrides.workers.unwrap_or(available_cpus);
        let workers = worker_count(
            requested,
            settings.probe.min_workers,
            settings.probe.max_workers,
        );

        let item_timeout = overrides
            .timeout_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or_else(|| settings.probe.item_timeout());

        Self {
            commands,
            pool: PoolOptions {
                workers,
                item_timeout,
            },
            launcher: settings.tools.launcher.clone(),
            url_opener: settings.tools.url_opener.clone(),
            selector: settings.selector.clone(),
            details_url: settings.store.details_url.clone(),
        }
    }

    pub fn user(&self) -> &str {
        &self.commands.user
    }
}
