//! Bounded worker pool for probing packages
//!
//! All package names are queued up front, then a fixed number of workers
//! drain the queue, resolving one package at a time under its own deadline.
//! Records flow back over a result channel that is closed only after every
//! worker has returned, so a reader that sees the channel end has seen every
//! record.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio::time::Instant;

use drawer_core::prelude::*;
use drawer_core::ProbeRecord;

use crate::commands::ProbeCommands;
use crate::resolver::resolve_package;
use crate::tool::ToolRunner;

/// Default per-package time budget
pub const DEFAULT_ITEM_TIMEOUT: Duration = Duration::from_secs(4);

/// Default lower bound on the worker count
pub const DEFAULT_MIN_WORKERS: usize = 4;

/// Default upper bound on the worker count
pub const DEFAULT_MAX_WORKERS: usize = 16;

/// Pool sizing and per-item deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolOptions {
    pub workers: usize,
    pub item_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            workers: worker_count(available_cpus(), DEFAULT_MIN_WORKERS, DEFAULT_MAX_WORKERS),
            item_timeout: DEFAULT_ITEM_TIMEOUT,
        }
    }
}

/// Clamp a processing-unit count into `[min, max]`
pub fn worker_count(available: usize, min: usize, max: usize) -> usize {
    available.clamp(min, max.max(min))
}

/// Processing units the process may use, 1 if unknown
pub fn available_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Start probing `packages` and return the result channel.
///
/// Exactly one record per package arrives on the receiver, in completion
/// order. The receiver yields `None` once the pool has fully shut down.
pub fn spawn_probes<R>(
    runner: Arc<R>,
    commands: Arc<ProbeCommands>,
    packages: Vec<String>,
    options: PoolOptions,
) -> mpsc::Receiver<ProbeRecord>
where
    R: ToolRunner + Send + Sync + 'static,
{
    let capacity = packages.len().max(1);
    let workers = options.workers.max(1);

    // Queue is sized to hold everything, so filling it never waits.
    let (queue_tx, queue_rx) = mpsc::channel::<String>(capacity);
    for package in packages {
        if queue_tx.try_send(package).is_err() {
            error!("Work queue rejected a package; this is a sizing bug");
        }
    }
    drop(queue_tx);

    let queue_rx = Arc::new(Mutex::new(queue_rx));
    let (results_tx, results_rx) = mpsc::channel::<ProbeRecord>(capacity);

    info!(
        "Probing with {} workers, {:?} per package",
        workers, options.item_timeout
    );

    let mut pool = JoinSet::new();
    for worker_id in 0..workers {
        pool.spawn(worker_loop(
            worker_id,
            Arc::clone(&runner),
            Arc::clone(&commands),
            Arc::clone(&queue_rx),
            results_tx.clone(),
            options.item_timeout,
        ));
    }

    // Join barrier: the last sender is dropped only after every worker is done
    tokio::spawn(async move {
        while let Some(joined) = pool.join_next().await {
            if let Err(e) = joined {
                error!("Probe worker ended abnormally: {}", e);
            }
        }
        debug!("All probe workers finished, closing result channel");
        drop(results_tx);
    });

    results_rx
}

async fn worker_loop<R>(
    worker_id: usize,
    runner: Arc<R>,
    commands: Arc<ProbeCommands>,
    queue: Arc<Mutex<mpsc::Receiver<String>>>,
    results: mpsc::Sender<ProbeRecord>,
    item_timeout: Duration,
) where
    R: ToolRunner + Send + Sync + 'static,
{
    let mut handled = 0usize;

    loop {
        // Guard is released before the package is probed
        let next = queue.lock().await.recv().await;
        let Some(package) = next else {
            break;
        };

        let deadline = Instant::now() + item_timeout;
        let record = resolve_package(runner.as_ref(), &commands, &package, deadline).await;
        handled += 1;

        if results.send(record).await.is_err() {
            warn!("Result receiver dropped; worker {} stopping", worker_id);
            break;
        }
    }

    trace!("Worker {} done after {} package(s)", worker_id, handled);
}
