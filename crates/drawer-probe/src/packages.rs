//! Package enumeration using `pm list packages`

use std::time::Duration;

use drawer_core::prelude::*;

use crate::commands::ProbeCommands;
use crate::tool::ToolRunner;

/// Prefix `pm` puts in front of each package and path line
pub const PACKAGE_PREFIX: &str = "package:";

/// Result of package enumeration
#[derive(Debug, Clone)]
pub struct PackageListing {
    /// Package identifiers in the order `pm` printed them
    pub packages: Vec<String>,

    /// Set when the listing tool failed; its output was used anyway
    pub warning: Option<String>,

    /// Time taken to list packages
    pub elapsed: Duration,
}

/// List third-party packages for the configured user.
///
/// The listing tool runs without a deadline. A failing exit status is not
/// fatal: whatever it printed is parsed and the failure is reported as a
/// warning. An empty list is left for the caller to judge.
pub async fn list_packages<R: ToolRunner>(runner: &R, commands: &ProbeCommands) -> PackageListing {
    let start = std::time::Instant::now();
    let invocation = commands.list_packages();

    info!("Listing packages: {}", invocation);

    let output = runner.run(&invocation, None).await;
    let packages = parse_package_list(&output.text);

    let warning = if output.succeeded {
        None
    } else {
        let message = format!(
            "{} failed; continuing with {} package(s) from its output",
            invocation,
            packages.len()
        );
        warn!("{}", message);
        Some(message)
    };

    let elapsed = start.elapsed();
    info!("Found {} packages in {:?}", packages.len(), elapsed);

    PackageListing {
        packages,
        warning,
        elapsed,
    }
}

/// Parse `pm list packages` output: one `package:<name>` per line
pub fn parse_package_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|line| strip_package_prefix(line.trim()))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strip the `package:` marker from a trimmed line, if present
pub(crate) fn strip_package_prefix(line: &str) -> &str {
    line.strip_prefix(PACKAGE_PREFIX).unwrap_or(line).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ScriptedRunner;
    use crate::tool::ToolOutput;

    #[test]
    fn test_parse_package_list() {
        let output = "package:com.android.chrome\npackage:org.mozilla.firefox\npackage:com.termux\n";
        let packages = parse_package_list(output);

        assert_eq!(
            packages,
            vec!["com.android.chrome", "org.mozilla.firefox", "com.termux"]
        );
    }

    #[test]
    fn test_parse_package_list_empty() {
        assert!(parse_package_list("").is_empty());
    }

    #[test]
    fn test_parse_package_list_skips_blank_lines_and_whitespace() {
        let output = "  package:com.a  \n\n   \npackage:\npackage:com.b\r\n";
        assert_eq!(parse_package_list(output), vec!["com.a", "com.b"]);
    }

    #[test]
    fn test_parse_package_list_without_prefix() {
        let output = "com.a\npackage:com.b";
        assert_eq!(parse_package_list(output), vec!["com.a", "com.b"]);
    }

    #[test]
    fn test_parse_package_list_keeps_duplicates() {
        let output = "package:com.a\npackage:com.a";
        assert_eq!(parse_package_list(output).len(), 2);
    }

    #[tokio::test]
    async fn test_list_packages_success_has_no_warning() {
        let commands = ProbeCommands::default();
        let runner = ScriptedRunner::new().respond(
            &commands.list_packages(),
            ToolOutput::success("package:com.a\npackage:com.b"),
        );

        let listing = list_packages(&runner, &commands).await;

        assert_eq!(listing.packages, vec!["com.a", "com.b"]);
        assert!(listing.warning.is_none());
    }

    #[tokio::test]
    async fn test_list_packages_failure_keeps_partial_output() {
        let commands = ProbeCommands::default();
        let runner = ScriptedRunner::new().respond(
            &commands.list_packages(),
            ToolOutput::failure("package:com.a\nError: permission denied for user 10"),
        );

        let listing = list_packages(&runner, &commands).await;

        // The error line has no prefix, so it is parsed as a name too
        assert_eq!(listing.packages.first().map(String::as_str), Some("com.a"));
        assert!(listing.warning.is_some());
    }

    #[tokio::test]
    async fn test_list_packages_no_output() {
        let commands = ProbeCommands::default();
        let runner = ScriptedRunner::new();

        let listing = list_packages(&runner, &commands).await;

        assert!(listing.packages.is_empty());
        assert!(listing.warning.is_some());
    }

    #[tokio::test]
    async fn test_list_packages_runs_without_deadline() {
        let commands = ProbeCommands::default();
        let runner = ScriptedRunner::new()
            .respond(&commands.list_packages(), ToolOutput::success("package:com.a"));

        list_packages(&runner, &commands).await;

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert!(!calls[0].had_deadline);
    }
}
