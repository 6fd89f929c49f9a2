//! Probe records: what the launcher knows about one installed app

use serde::{Serialize, Serializer};

/// Wire text for an entry point that could not be resolved.
///
/// The selector line format carries this string in place of a component
/// name; [`EntryPoint::from_wire`] maps it back to [`EntryPoint::Unknown`].
pub const UNKNOWN_ENTRY: &str = "UNKNOWN_ENTRY";

/// The launchable component of an app's main/launcher intent
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    /// Fully-qualified activity name, e.g. `com.android.chrome.Main`
    Component(String),
    /// No launcher activity could be resolved
    Unknown,
}

impl EntryPoint {
    /// Build an entry point from an extracted component name.
    ///
    /// Blank input is treated as unresolved so a record never carries an
    /// empty entry point.
    pub fn component(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.trim().is_empty() {
            EntryPoint::Unknown
        } else {
            EntryPoint::Component(name)
        }
    }

    /// Parse the selector wire representation
    pub fn from_wire(text: &str) -> Self {
        if text == UNKNOWN_ENTRY {
            EntryPoint::Unknown
        } else {
            EntryPoint::component(text)
        }
    }

    /// Wire representation used in the selector line format
    pub fn as_wire(&self) -> &str {
        match self {
            EntryPoint::Component(name) => name,
            EntryPoint::Unknown => UNKNOWN_ENTRY,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, EntryPoint::Unknown)
    }
}

impl std::fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl Serialize for EntryPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

/// Everything resolved about one installed app.
///
/// Built once by the attribute resolver and never mutated. `label` falls back
/// to the identifier, so neither `label` nor `entry_point` is ever empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeRecord {
    /// Human-readable name shown in the selector
    pub label: String,
    /// Package name
    pub identifier: String,
    /// Launcher activity, or [`EntryPoint::Unknown`]
    pub entry_point: EntryPoint,
}

impl ProbeRecord {
    /// Assemble a record, applying the identifier-as-label fallback
    pub fn new(identifier: impl Into<String>, label: Option<String>, entry_point: EntryPoint) -> Self {
        let identifier = identifier.into();
        let label = label
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| identifier.clone());

        Self {
            label,
            identifier,
            entry_point,
        }
    }

    /// Whether the label came from the app itself rather than the fallback
    pub fn has_resolved_label(&self) -> bool {
        self.label != self.identifier
    }

    /// Whether both label and entry point were resolved
    pub fn is_fully_resolved(&self) -> bool {
        self.has_resolved_label() && !self.entry_point.is_unknown()
    }
}
