//! Settings loader for `config.toml`

use super::types::Settings;
use drawer_core::prelude::*;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "app-drawer";

const DEFAULT_CONFIG: &str = r#"# App Drawer Configuration

[probe]
timeout_ms = 4000       # Budget per app for all three lookups
min_workers = 4         # Worker count is the CPU count clamped to these bounds
max_workers = 16
user = "0"              # Android user passed to pm and am

[tools]
package_manager = "pm"
badging = "aapt"
launcher = "am"
url_opener = "termux-open-url"

[selector]
command = "fzf"
# The selector must display only the first tab-separated field and print
# the whole selected line.
args = ["--with-nth=1", "--delimiter=\t", "--layout=reverse"]

[store]
details_url = "https://play.google.com/store/apps/details"
"#;

/// Default config location: `~/.config/app-drawer/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}

/// Load settings.
///
/// With an explicit path the file must exist and parse. Otherwise the default
/// location is tried, and a missing or broken file falls back to defaults
/// with a warning. Either way the result is validated.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    let settings = match explicit {
        Some(path) => load_settings_from(path)?,
        None => match default_config_path() {
            Some(path) => load_default_settings(&path),
            None => {
                debug!("No config directory on this platform, using defaults");
                Settings::default()
            }
        },
    };

    settings.validate()?;
    Ok(settings)
}

/// Load and parse a specific config file
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read {}: {}", path.display(), e)))?;

    let settings = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {}", path.display(), e)))?;

    debug!("Loaded settings from {:?}", path);
    Ok(settings)
}

fn load_default_settings(path: &Path) -> Settings {
    if !path.exists() {
        debug!("No config file at {:?}, using defaults", path);
        return Settings::default();
    }

    match load_settings_from(path) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("{}; using defaults", e);
            Settings::default()
        }
    }
}

/// Write the commented default config to `path` unless a file is already
/// there. Returns whether a file was written.
pub fn init_config_file(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            Error::config(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }

    std::fs::write(path, DEFAULT_CONFIG)
        .map_err(|e| Error::config(format!("Failed to write {}: {}", path.display(), e)))?;

    info!("Created default config at {:?}", path);
    Ok(true)
}
