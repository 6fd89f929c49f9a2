//! Result aggregation and presentation order

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use drawer_core::prelude::*;
use drawer_core::ProbeRecord;

use crate::commands::ProbeCommands;
use crate::pool::{spawn_probes, PoolOptions};
use crate::tool::ToolRunner;

/// Counts describing how complete a probe run was
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeSummary {
    pub total: usize,
    pub fully_resolved: usize,
    pub without_entry_point: usize,
    pub label_fallbacks: usize,
}

impl ProbeSummary {
    pub fn from_records(records: &[ProbeRecord]) -> Self {
        records.iter().fold(
            Self {
                total: records.len(),
                ..Self::default()
            },
            |mut summary, record| {
                if record.is_fully_resolved() {
                    summary.fully_resolved += 1;
                }
                if record.entry_point.is_unknown() {
                    summary.without_entry_point += 1;
                }
                if !record.has_resolved_label() {
                    summary.label_fallbacks += 1;
                }
                summary
            },
        )
    }
}

/// Drain the result channel until the pool closes it, then sort
pub async fn aggregate(mut results: mpsc::Receiver<ProbeRecord>) -> Vec<ProbeRecord> {
    let mut records = Vec::new();
    while let Some(record) = results.recv().await {
        records.push(record);
    }
    sort_records(&mut records);
    records
}

/// Case-insensitive ascending sort by label. Stable, so ties keep the order
/// they arrived in.
pub fn sort_records(records: &mut [ProbeRecord]) {
    records.sort_by_cached_key(|record| record.label.to_lowercase());
}

/// Probe every package and return records in presentation order
pub async fn probe_all<R>(
    runner: Arc<R>,
    commands: Arc<ProbeCommands>,
    packages: Vec<String>,
    options: PoolOptions,
) -> Vec<ProbeRecord>
where
    R: ToolRunner + Send + Sync + 'static,
{
    let start = std::time::Instant::now();
    let records = aggregate(spawn_probes(runner, commands, packages, options)).await;
    log_summary(&ProbeSummary::from_records(&records), start.elapsed());
    records
}

fn log_summary(summary: &ProbeSummary, elapsed: Duration) {
    info!(
        "Probed {} packages in {:?}: {} fully resolved, {} without entry point, {} label fallbacks",
        summary.total,
        elapsed,
        summary.fully_resolved,
        summary.without_entry_point,
        summary.label_fallbacks
    );
}
