//! Tool availability checking
//!
//! Looks up the external tools the launcher depends on before any probing
//! starts, so a missing binary is reported once instead of failing every
//! lookup in turn.

use std::path::PathBuf;

use drawer_core::prelude::*;

/// A tool name and where it was found, if anywhere
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolStatus {
    pub name: String,
    pub path: Option<PathBuf>,
}

impl ToolStatus {
    /// Resolve `name` on `PATH` (absolute paths are checked as given)
    pub fn locate(name: &str) -> Self {
        let path = which::which(name)
            .inspect_err(|e| debug!("{} not found: {}", name, e))
            .ok();
        Self {
            name: name.to_string(),
            path,
        }
    }

    pub fn is_available(&self) -> bool {
        self.path.is_some()
    }
}

/// Availability of the tools needed for one run
#[derive(Debug, Clone, Default)]
pub struct ToolAvailability {
    /// Package manager (`pm`)
    pub package_manager: ToolStatus,

    /// Badging dump tool (`aapt`)
    pub badging: ToolStatus,

    /// Interactive selector (`fzf`)
    pub selector: ToolStatus,
}

impl ToolAvailability {
    /// Check tool availability (run once at startup)
    pub fn check(package_manager: &str, badging: &str, selector: &str) -> Self {
        Self {
            package_manager: ToolStatus::locate(package_manager),
            badging: ToolStatus::locate(badging),
            selector: ToolStatus::locate(selector),
        }
    }

    /// Fail if tools needed for the requested mode are missing.
    ///
    /// The badging tool is optional: without it labels fall back to package
    /// names. The selector is only needed in interactive mode.
    pub fn require(&self, needs_selector: bool) -> Result<()> {
        if !self.package_manager.is_available() {
            return Err(Error::tool_not_found(
                &self.package_manager.name,
                "App Drawer must run on the Android device (e.g. inside Termux).",
            ));
        }

        if needs_selector && !self.selector.is_available() {
            return Err(Error::tool_not_found(
                &self.selector.name,
                "Install it with: pkg install fzf",
            ));
        }

        Ok(())
    }

    /// User-facing warning when labels will not be resolved
    pub fn badging_unavailable_message(&self) -> Option<String> {
        if self.badging.is_available() {
            None
        } else {
            Some(format!(
                "{} not found; app labels will show package names. Install it with: pkg install aapt",
                self.badging.name
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(name: &str, path: Option<&str>) -> ToolStatus {
        ToolStatus {
            name: name.to_string(),
            path: path.map(PathBuf::from),
        }
    }

    #[test]
    fn test_tool_availability_default() {
        let availability = ToolAvailability::default();
        assert!(!availability.package_manager.is_available());
        assert!(!availability.badging.is_available());
        assert!(!availability.selector.is_available());
    }

    #[test]
    fn test_missing_package_manager_is_fatal() {
        let availability = ToolAvailability {
            package_manager: status("pm", None),
            badging: status("aapt", None),
            selector: status("fzf", Some("/usr/bin/fzf")),
        };
        let err = availability.require(false).unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { ref tool, .. } if tool == "pm"));
    }

    #[test]
    fn test_missing_selector_only_matters_interactively() {
        let availability = ToolAvailability {
            package_manager: status("pm", Some("/system/bin/pm")),
            badging: status("aapt", None),
            selector: status("sk", None),
        };
        assert!(availability.require(false).is_ok());
        let err = availability.require(true).unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { ref tool, .. } if tool == "sk"));
    }

    #[test]
    fn test_badging_unavailable_message() {
        let mut availability = ToolAvailability::default();
        availability.badging = status("aapt2", None);
        let message = availability.badging_unavailable_message().unwrap();
        assert!(message.starts_with("aapt2 not found"));

        availability.badging = status("aapt2", Some("/usr/bin/aapt2"));
        assert!(availability.badging_unavailable_message().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_check_finds_shell() {
        let availability = ToolAvailability::check("sh", "drawer-no-such-aapt", "sh");
        assert!(availability.package_manager.is_available());
        assert!(!availability.badging.is_available());
        assert!(availability.selector.is_available());
    }
}
