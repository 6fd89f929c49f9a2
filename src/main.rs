//! App Drawer - fuzzy-searchable launcher for installed Android apps
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use app_drawer::{Mode, Options};
use clap::Parser;
use drawer_app::Overrides;

/// App Drawer - pick an installed app with a fuzzy finder and launch it
#[derive(Parser, Debug)]
#[command(name = "drawer", version)]
#[command(about = "Pick an installed app with a fuzzy finder and launch it", long_about = None)]
struct Args {
    /// Config file (default: ~/.config/app-drawer/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Time budget per app for its lookups, in milliseconds
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Number of probe workers (clamped to the configured bounds)
    #[arg(long, value_name = "N")]
    workers: Option<usize>,

    /// Android user whose apps are listed and launched
    #[arg(long, value_name = "ID")]
    user: Option<String>,

    /// Print the probed apps as JSON lines instead of opening the selector
    #[arg(long, conflicts_with = "init_config")]
    list: bool,

    /// Write a default config file and exit
    #[arg(long)]
    init_config: bool,
}

impl From<Args> for Options {
    fn from(args: Args) -> Self {
        let mode = if args.init_config {
            Mode::InitConfig
        } else if args.list {
            Mode::List
        } else {
            Mode::Interactive
        };

        Self {
            config_path: args.config,
            overrides: Overrides {
                timeout_ms: args.timeout_ms,
                workers: args.workers,
                user: args.user,
            },
            mode,
        }
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if let Err(e) = drawer_core::logging::init() {
        eprintln!("Warning: file logging disabled: {}", e);
    }

    if let Err(e) = app_drawer::run(args.into()).await {
        tracing::error!("Exiting: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }

    Ok(())
}
