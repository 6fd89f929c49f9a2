//! Per-package attribute resolution
//!
//! Three lookups per package, all sharing one deadline:
//!
//! 1. launcher activity via `pm resolve-activity`
//! 2. APK path via `pm path`
//! 3. display label via `aapt dump badging <apk>` (skipped without a path)
//!
//! Each lookup can fail on its own. Failures are absorbed into fallbacks:
//! [`EntryPoint::Unknown`] for the activity and the package name for the
//! label, so resolution always yields a usable record.

use tokio::time::Instant;

use drawer_core::prelude::*;
use drawer_core::{EntryPoint, ProbeRecord};

use crate::commands::ProbeCommands;
use crate::packages::strip_package_prefix;
use crate::tool::ToolRunner;

const ACTIVITY_NAME_MARKER: &str = "name=";
const LABEL_MARKER: &str = "application-label:";

/// Resolve label and entry point for one package. Never fails.
pub async fn resolve_package<R: ToolRunner>(
    runner: &R,
    commands: &ProbeCommands,
    package: &str,
    deadline: Instant,
) -> ProbeRecord {
    let activity = runner
        .run(&commands.resolve_activity(package), Some(deadline))
        .await;
    // Output is scanned even when pm reports failure
    let entry_point = parse_entry_point(&activity.text);

    let path = runner
        .run(&commands.package_path(package), Some(deadline))
        .await;
    let apk_path = parse_package_path(&path.text);

    let label = match apk_path {
        Some(apk) => {
            let badging = runner.run(&commands.dump_badging(apk), Some(deadline)).await;
            if badging.succeeded && !badging.text.is_empty() {
                parse_application_label(&badging.text)
            } else {
                trace!("{}: badging unavailable for {}", package, apk);
                None
            }
        }
        None => {
            trace!("{}: no APK path, skipping label lookup", package);
            None
        }
    };

    let record = ProbeRecord::new(package, label, entry_point);
    debug!(
        "Resolved {} -> label={:?} entry={}",
        record.identifier, record.label, record.entry_point
    );
    record
}

/// Entry point from `pm resolve-activity` output: the text after `name=` on
/// the first line that carries it
pub fn parse_entry_point(output: &str) -> EntryPoint {
    output
        .lines()
        .find_map(|line| {
            line.find(ACTIVITY_NAME_MARKER)
                .map(|idx| line[idx + ACTIVITY_NAME_MARKER.len()..].trim())
        })
        .map(EntryPoint::component)
        .unwrap_or(EntryPoint::Unknown)
}

/// First non-empty APK path from `pm path` output
pub fn parse_package_path(output: &str) -> Option<&str> {
    output
        .lines()
        .map(|line| strip_package_prefix(line.trim()))
        .find(|path| !path.is_empty())
}

/// Label from `aapt dump badging` output: `application-label:'<value>'`
pub fn parse_application_label(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|line| {
            line.find(LABEL_MARKER)
                .map(|idx| &line[idx + LABEL_MARKER.len()..])
        })
        .map(|value| value.trim().trim_matches(['\'', '"']).to_string())
        .filter(|label| !label.is_empty())
}
