//! Command lines for the platform lookups
//!
//! Tool names and the Android user id come from configuration; the argument
//! shapes below are what `pm` and `aapt` expect on-device.

use crate::tool::Invocation;

const INTENT_ACTION_MAIN: &str = "android.intent.action.MAIN";
const INTENT_CATEGORY_LAUNCHER: &str = "android.intent.category.LAUNCHER";

/// Builds the invocations used to enumerate and probe packages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeCommands {
    /// Package manager binary (`pm`)
    pub package_manager: String,
    /// Badging/metadata dump binary (`aapt`)
    pub badging: String,
    /// Android user whose packages are listed and resolved
    pub user: String,
}

impl Default for ProbeCommands {
    fn default() -> Self {
        Self {
            package_manager: "pm".to_string(),
            badging: "aapt".to_string(),
            user: "0".to_string(),
        }
    }
}

impl ProbeCommands {
    /// `pm list packages --user <user> -3` (third-party packages only)
    pub fn list_packages(&self) -> Invocation {
        Invocation::new(&self.package_manager).args([
            "list",
            "packages",
            "--user",
            self.user.as_str(),
            "-3",
        ])
    }

    /// `pm resolve-activity` for the MAIN/LAUNCHER intent of `package`
    pub fn resolve_activity(&self, package: &str) -> Invocation {
        Invocation::new(&self.package_manager).args([
            "resolve-activity",
            "--user",
            self.user.as_str(),
            "-a",
            INTENT_ACTION_MAIN,
            "-c",
            INTENT_CATEGORY_LAUNCHER,
            package,
        ])
    }

    /// `pm path <package> --user <user>`
    pub fn package_path(&self, package: &str) -> Invocation {
        Invocation::new(&self.package_manager).args(["path", package, "--user", self.user.as_str()])
    }

    /// `aapt dump badging <apk>`
    pub fn dump_badging(&self, apk_path: &str) -> Invocation {
        Invocation::new(&self.badging).args(["dump", "badging", apk_path])
    }
}
