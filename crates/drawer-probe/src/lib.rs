//! # drawer-probe - Package Enumeration and Probing
//!
//! Runs the platform tools (`pm`, `aapt`) that describe installed apps, and
//! fans the per-package lookups out over a bounded worker pool.
//!
//! Depends on [`drawer_core`] for the record model and error handling.
//!
//! ## Public API
//!
//! ### Tool Invocation
//! - [`ToolRunner`] - Run an external command under an optional deadline
//! - [`SystemToolRunner`] - [`ToolRunner`] backed by child processes
//! - [`Invocation`], [`ToolOutput`] - Command line in, combined output out
//! - [`ProbeCommands`] - Builds the `pm`/`aapt` command lines
//!
//! ### Enumeration
//! - [`list_packages()`] - List third-party packages via `pm list packages`
//!
//! ### Resolution
//! - [`resolve_package()`] - Label and launcher activity for one package
//!
//! ### Pool and Aggregation
//! - [`spawn_probes()`] - Start the worker pool, returning the result channel
//! - [`aggregate()`] - Drain the result channel into presentation order
//! - [`probe_all()`] - Both of the above in one call
//! - [`worker_count()`] - Clamp the processing-unit count into pool bounds
//!
//! ### Platform Utilities
//! - [`ToolAvailability`] - Check for `pm`, `aapt` and the selector on `PATH`

pub mod aggregate;
pub mod commands;
pub mod packages;
pub mod pool;
pub mod resolver;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;
pub mod tool;
pub mod tool_availability;

// Public API re-exports
pub use aggregate::{aggregate, probe_all, sort_records, ProbeSummary};
pub use commands::ProbeCommands;
pub use packages::{list_packages, parse_package_list, PackageListing};
pub use pool::{
    available_cpus, spawn_probes, worker_count, PoolOptions, DEFAULT_ITEM_TIMEOUT,
    DEFAULT_MAX_WORKERS, DEFAULT_MIN_WORKERS,
};
pub use resolver::{
    parse_application_label, parse_entry_point, parse_package_path, resolve_package,
};
pub use tool::{Invocation, LocalToolRunner, SystemToolRunner, ToolOutput, ToolRunner};
pub use tool_availability::{ToolAvailability, ToolStatus};
