//! Top-level run modes
//!
//! Everything here returns [`drawer_core::Error`] so the binary can print a
//! single line and exit with the error's status.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use drawer_app::config::{default_config_path, init_config_file, load_settings};
use drawer_app::{
    available_cpus, write_json_lines, CommandSelector, Launcher, Overrides, RunConfig,
    SystemToolRunner, ToolAvailability,
};
use drawer_core::prelude::*;

/// What the binary was asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Probe, select, dispatch
    #[default]
    Interactive,
    /// Probe and print JSON lines
    List,
    /// Write the default config file
    InitConfig,
}

/// Parsed command line, independent of the CLI parser
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub config_path: Option<PathBuf>,
    pub overrides: Overrides,
    pub mode: Mode,
}

pub async fn run(options: Options) -> Result<()> {
    if options.mode == Mode::InitConfig {
        return init_config(options.config_path);
    }

    let settings = load_settings(options.config_path.as_deref())?;
    let config = RunConfig::resolve(&settings, &options.overrides, available_cpus());

    let tools = ToolAvailability::check(
        &config.commands.package_manager,
        &config.commands.badging,
        &config.selector.command,
    );
    tools.require(options.mode == Mode::Interactive)?;
    if let Some(message) = tools.badging_unavailable_message() {
        warn!("{}", message);
        eprintln!("Warning: {}", message);
    }

    let selector = CommandSelector::from_settings(&config.selector);
    let launcher = Launcher::new(Arc::new(SystemToolRunner), selector, config);

    let probe = launcher.probe().await?;
    for warning in &probe.warnings {
        eprintln!("Warning: {}", warning);
    }

    if options.mode == Mode::List {
        return write_json_lines(&probe.records, std::io::stdout().lock())
            .context("Writing record list");
    }

    match launcher.present_and_dispatch(&probe.records).await {
        Ok(outcome) => {
            if !outcome.output.text.is_empty() {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{}", outcome.output.text).context("Echoing dispatch output")?;
            }
            Ok(())
        }
        // Dispatch problems never fail the run
        Err(e) if e.is_recoverable() => {
            warn!("Dispatch skipped: {}", e);
            eprintln!("Warning: {}", e);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn init_config(explicit: Option<PathBuf>) -> Result<()> {
    let path = explicit
        .or_else(default_config_path)
        .ok_or_else(|| Error::config("No config directory found; pass --config <PATH>"))?;

    if init_config_file(&path)? {
        eprintln!("Created {}", path.display());
    } else {
        eprintln!("{} already exists, leaving it unchanged", path.display());
    }
    Ok(())
}
