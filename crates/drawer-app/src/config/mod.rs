//! Configuration for App Drawer
//!
//! Supports:
//! - `~/.config/app-drawer/config.toml` - Tool names, pool bounds, selector, store URL
//! - Command-line overrides layered on top

pub mod priority;
pub mod settings;
pub mod types;

pub use priority::{Overrides, RunConfig};
pub use settings::{default_config_path, init_config_file, load_settings, load_settings_from};
pub use types::*;
