//! Selector exchange format
//!
//! One line per record: `<label>\t<identifier>|<entryPoint>\n`. The selector
//! is configured to show and search only the field before the tab, and hands
//! back the whole line on selection.

use crate::error::{Error, Result};
use crate::record::{EntryPoint, ProbeRecord};

const FIELD_SEPARATOR: char = '\t';
const TARGET_SEPARATOR: char = '|';

/// A parsed selector line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub identifier: String,
    pub entry_point: EntryPoint,
}

/// Serialize one record as an exchange line, newline included
pub fn format_line(record: &ProbeRecord) -> String {
    format!(
        "{}{}{}{}{}\n",
        flatten_label(&record.label),
        FIELD_SEPARATOR,
        record.identifier,
        TARGET_SEPARATOR,
        record.entry_point.as_wire()
    )
}

/// Serialize records in order into the block fed to the selector
pub fn format_block(records: &[ProbeRecord]) -> String {
    records.iter().map(format_line).collect()
}

/// Parse a line returned by the selector.
///
/// Splits on the first tab, then the remainder on the first pipe. Anything
/// other than exactly two parts at each step is malformed.
pub fn parse_line(line: &str) -> Result<Selection> {
    let trimmed = line.trim_end_matches(['\n', '\r']);

    let (_label, target) = trimmed
        .split_once(FIELD_SEPARATOR)
        .ok_or_else(|| Error::malformed_selection(trimmed))?;

    let (identifier, entry) = target
        .split_once(TARGET_SEPARATOR)
        .ok_or_else(|| Error::malformed_selection(trimmed))?;

    if identifier.is_empty() || entry.is_empty() {
        return Err(Error::malformed_selection(trimmed));
    }

    Ok(Selection {
        identifier: identifier.to_string(),
        entry_point: EntryPoint::from_wire(entry),
    })
}

/// Labels come from app metadata; keep them on one line with no extra tabs
fn flatten_label(label: &str) -> String {
    label.replace(['\t', '\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(label: &str, id: &str, entry: EntryPoint) -> ProbeRecord {
        ProbeRecord::new(id, Some(label.to_string()), entry)
    }

    #[test]
    fn test_format_line() {
        let r = record(
            "Chrome",
            "com.android.chrome",
            EntryPoint::component("com.android.chrome.Main"),
        );
        assert_eq!(
            format_line(&r),
            "Chrome\tcom.android.chrome|com.android.chrome.Main\n"
        );
    }

    #[test]
    fn test_format_line_with_unknown_entry() {
        let r = record("SomeApp", "com.example.app", EntryPoint::Unknown);
        assert_eq!(format_line(&r), "SomeApp\tcom.example.app|UNKNOWN_ENTRY\n");
    }

    #[test]
    fn test_format_line_flattens_control_characters_in_label() {
        let r = record("Two\tWords\nApp", "com.example.app", EntryPoint::Unknown);
        let line = format_line(&r);
        assert_eq!(line, "Two Words App\tcom.example.app|UNKNOWN_ENTRY\n");
        assert_eq!(line.matches('\t').count(), 1);
    }

    #[test]
    fn test_format_block_preserves_order() {
        let records = vec![
            record("B", "com.b", EntryPoint::Unknown),
            record("A", "com.a", EntryPoint::Unknown),
        ];
        let block = format_block(&records);
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines, vec!["B\tcom.b|UNKNOWN_ENTRY", "A\tcom.a|UNKNOWN_ENTRY"]);
    }

    #[test]
    fn test_format_block_empty() {
        assert_eq!(format_block(&[]), "");
    }

    #[test]
    fn test_parse_line() {
        let sel = parse_line("Chrome\tcom.android.chrome|com.android.chrome.Main").unwrap();
        assert_eq!(sel.identifier, "com.android.chrome");
        assert_eq!(
            sel.entry_point,
            EntryPoint::Component("com.android.chrome.Main".to_string())
        );
    }

    #[test]
    fn test_parse_line_with_sentinel() {
        let sel = parse_line("SomeApp\tcom.example.app|UNKNOWN_ENTRY").unwrap();
        assert_eq!(sel.identifier, "com.example.app");
        assert!(sel.entry_point.is_unknown());
    }

    #[test]
    fn test_parse_line_ignores_trailing_newline() {
        let sel = parse_line("Chrome\tcom.android.chrome|com.android.chrome.Main\n").unwrap();
        assert_eq!(sel.identifier, "com.android.chrome");
    }

    #[test]
    fn test_parse_line_splits_on_first_separators_only() {
        let sel = parse_line("Odd\tLabel\tcom.example|a.B|C").unwrap();
        // First tab ends the label; first pipe ends the identifier.
        assert_eq!(sel.identifier, "Label\tcom.example");
        assert_eq!(sel.entry_point, EntryPoint::Component("a.B|C".to_string()));
    }

    #[test]
    fn test_parse_line_missing_pipe_is_malformed() {
        let err = parse_line("Chrome\tcom.android.chrome").unwrap_err();
        assert!(matches!(err, Error::MalformedSelection { .. }));
    }

    #[test]
    fn test_parse_line_missing_tab_is_malformed() {
        let err = parse_line("com.android.chrome|com.android.chrome.Main").unwrap_err();
        assert!(matches!(err, Error::MalformedSelection { .. }));
    }

    #[test]
    fn test_parse_line_empty_is_malformed() {
        assert!(parse_line("").is_err());
        assert!(parse_line("Label\t|").is_err());
    }

    #[test]
    fn test_format_then_parse_recovers_target() {
        let r = record(
            "Maps",
            "com.google.android.apps.maps",
            EntryPoint::component("com.google.android.maps.MapsActivity"),
        );
        let sel = parse_line(&format_line(&r)).unwrap();
        assert_eq!(sel.identifier, r.identifier);
        assert_eq!(sel.entry_point, r.entry_point);
    }
}
