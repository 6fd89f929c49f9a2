//! Configuration types for App Drawer
//!
//! Defines:
//! - `Settings` - Contents of `config.toml`
//! - One sub-struct per TOML section

use serde::{Deserialize, Serialize};
use std::time::Duration;

use drawer_core::prelude::*;
use drawer_probe::ProbeCommands;

/// Application settings (`config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub probe: ProbeSettings,

    #[serde(default)]
    pub tools: ToolSettings,

    #[serde(default)]
    pub selector: SelectorSettings,

    #[serde(default)]
    pub store: StoreSettings,
}

impl Settings {
    /// Reject values the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.probe.timeout_ms == 0 {
            return Err(Error::config_invalid("probe.timeout_ms must be greater than 0"));
        }
        if self.probe.min_workers == 0 {
            return Err(Error::config_invalid("probe.min_workers must be at least 1"));
        }
        if self.probe.min_workers > self.probe.max_workers {
            return Err(Error::config_invalid(format!(
                "probe.min_workers ({}) is greater than probe.max_workers ({})",
                self.probe.min_workers, self.probe.max_workers
            )));
        }
        if self.probe.user.trim().is_empty() {
            return Err(Error::config_invalid("probe.user must not be empty"));
        }

        for (key, value) in [
            ("tools.package_manager", &self.tools.package_manager),
            ("tools.badging", &self.tools.badging),
            ("tools.launcher", &self.tools.launcher),
            ("tools.url_opener", &self.tools.url_opener),
            ("selector.command", &self.selector.command),
        ] {
            if value.trim().is_empty() {
                return Err(Error::config_invalid(format!("{} must not be empty", key)));
            }
        }

        let url = url::Url::parse(&self.store.details_url).map_err(|e| {
            Error::config_invalid(format!(
                "store.details_url {:?} is not a valid URL: {}",
                self.store.details_url, e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config_invalid(format!(
                "store.details_url must use http or https, got {:?}",
                url.scheme()
            )));
        }

        Ok(())
    }

    /// Command lines for enumeration and probing
    pub fn probe_commands(&self) -> ProbeCommands {
        ProbeCommands {
            package_manager: self.tools.package_manager.clone(),
            badging: self.tools.badging.clone(),
            user: self.probe.user.clone(),
        }
    }
}

/// Probing settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProbeSettings {
    /// Time budget per package, shared by its three lookups
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Lower bound on the worker count
    #[serde(default = "default_min_workers")]
    pub min_workers: usize,

    /// Upper bound on the worker count
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// Android user id passed to `pm` and `am`
    #[serde(default = "default_user")]
    pub user: String,
}

impl ProbeSettings {
    pub fn item_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            min_workers: default_min_workers(),
            max_workers: default_max_workers(),
            user: default_user(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    drawer_probe::DEFAULT_ITEM_TIMEOUT.as_millis() as u64
}

fn default_min_workers() -> usize {
    drawer_probe::DEFAULT_MIN_WORKERS
}

fn default_max_workers() -> usize {
    drawer_probe::DEFAULT_MAX_WORKERS
}

fn default_user() -> String {
    "0".to_string()
}

/// External tool names
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ToolSettings {
    #[serde(default = "default_package_manager")]
    pub package_manager: String,

    #[serde(default = "default_badging")]
    pub badging: String,

    #[serde(default = "default_launcher")]
    pub launcher: String,

    #[serde(default = "default_url_opener")]
    pub url_opener: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            package_manager: default_package_manager(),
            badging: default_badging(),
            launcher: default_launcher(),
            url_opener: default_url_opener(),
        }
    }
}

fn default_package_manager() -> String {
    "pm".to_string()
}

fn default_badging() -> String {
    "aapt".to_string()
}

fn default_launcher() -> String {
    "am".to_string()
}

fn default_url_opener() -> String {
    "termux-open-url".to_string()
}

/// Fuzzy selector invocation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SelectorSettings {
    #[serde(default = "default_selector_command")]
    pub command: String,

    /// Must show only the first tab-separated field and print the whole line
    #[serde(default = "default_selector_args")]
    pub args: Vec<String>,
}

impl Default for SelectorSettings {
    fn default() -> Self {
        Self {
            command: default_selector_command(),
            args: default_selector_args(),
        }
    }
}

fn default_selector_command() -> String {
    "fzf".to_string()
}

fn default_selector_args() -> Vec<String> {
    vec![
        "--with-nth=1".to_string(),
        "--delimiter=\t".to_string(),
        "--layout=reverse".to_string(),
    ]
}

/// Store page for apps without a launcher activity
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoreSettings {
    /// Details page; the package is appended as `?id=<package>`
    #[serde(default = "default_details_url")]
    pub details_url: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            details_url: default_details_url(),
        }
    }
}

fn default_details_url() -> String {
    "https://play.google.com/store/apps/details".to_string()
}
