//! # drawer-core - Core Domain Types
//!
//! Foundation crate for App Drawer. Provides the probe record model, the
//! selector exchange format, error handling and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Records (`record`)
//! - [`ProbeRecord`] - Label, package name and entry point of one installed app
//! - [`EntryPoint`] - Resolved launcher activity, or unknown
//! - [`UNKNOWN_ENTRY`] - Wire text for an unresolved entry point
//!
//! ### Exchange Format (`exchange`)
//! - [`format_block()`] - Serialize records into selector input
//! - [`parse_line()`] - Parse the line the selector returns into a [`Selection`]
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use drawer_core::prelude::*;
//! ```

pub mod error;
pub mod exchange;
pub mod logging;
pub mod prelude;
pub mod record;

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use exchange::{format_block, format_line, parse_line, Selection};
pub use record::{EntryPoint, ProbeRecord, UNKNOWN_ENTRY};
