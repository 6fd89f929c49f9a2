//! drawer-app - Configuration, selection and dispatch for App Drawer
//!
//! Ties the probing pipeline from [`drawer_probe`] to the user: loads
//! `config.toml`, feeds the sorted records to the fuzzy selector, and
//! launches (or opens the store page for) the chosen app.

pub mod config;
pub mod dispatch;
pub mod headless;
pub mod launcher;
pub mod selector;

// Re-export primary types
pub use config::{Overrides, RunConfig, Settings};
pub use dispatch::{store_url, DispatchAction, DispatchOutcome, Dispatcher};
pub use headless::write_json_lines;
pub use launcher::{Launcher, ProbeRun};
pub use selector::{CommandSelector, LocalSelector, Selector};

// Re-export probe types the binary needs
pub use drawer_probe::{available_cpus, SystemToolRunner, ToolAvailability};
