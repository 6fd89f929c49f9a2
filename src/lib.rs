//! App Drawer Library
//!
//! Fuzzy-searchable launcher for the apps installed on an Android device.

pub mod run;

// Re-export main entry points
pub use run::{run, Mode, Options};
