//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // External Tool Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Required tool not found on PATH: {tool}. {hint}")]
    ToolNotFound { tool: String, hint: String },

    #[error("Failed to spawn {tool}: {reason}")]
    ToolSpawn { tool: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // Enumeration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("No installed packages found")]
    NoPackages,

    // ─────────────────────────────────────────────────────────────
    // Selection Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Selection was cancelled")]
    SelectionCancelled,

    #[error("Selector failed: {message}")]
    Selector { message: String },

    #[error("Unexpected selection format: {line:?}")]
    MalformedSelection { line: String },

    // ─────────────────────────────────────────────────────────────
    // Dispatch Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid store URL: {message}")]
    StoreUrl { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    ConfigInvalid { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn tool_not_found(tool: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::ToolNotFound {
            tool: tool.into(),
            hint: hint.into(),
        }
    }

    pub fn tool_spawn(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ToolSpawn {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    pub fn selector(message: impl Into<String>) -> Self {
        Self::Selector {
            message: message.into(),
        }
    }

    pub fn malformed_selection(line: impl Into<String>) -> Self {
        Self::MalformedSelection { line: line.into() }
    }

    pub fn store_url(message: impl Into<String>) -> Self {
        Self::StoreUrl {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::StoreUrl { .. })
    }

    /// Check if this error should end the run with a non-zero status
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::NoPackages
                | Error::SelectionCancelled
                | Error::Selector { .. }
                | Error::MalformedSelection { .. }
                | Error::ToolNotFound { .. }
                | Error::ToolSpawn { .. }
                | Error::Config { .. }
                | Error::ConfigNotFound { .. }
                | Error::ConfigInvalid { .. }
        )
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        1
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::NoPackages;
        assert_eq!(err.to_string(), "No installed packages found");

        let err = Error::malformed_selection("Chrome\tcom.android.chrome");
        assert!(err.to_string().contains("Unexpected selection format"));
        assert!(err.to_string().contains("com.android.chrome"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_run_ending_errors_are_fatal() {
        assert!(Error::NoPackages.is_fatal());
        assert!(Error::SelectionCancelled.is_fatal());
        assert!(Error::malformed_selection("x").is_fatal());
        assert!(Error::config_invalid("timeout_ms must be positive").is_fatal());
        assert!(Error::tool_not_found("fzf", "pkg install fzf").is_fatal());
    }

    #[test]
    fn test_error_is_recoverable() {
        assert!(Error::store_url("relative URL").is_recoverable());
        assert!(!Error::NoPackages.is_recoverable());
        assert!(!Error::malformed_selection("x").is_recoverable());
    }

    #[test]
    fn test_exit_code_is_one() {
        assert_eq!(Error::NoPackages.exit_code(), 1);
        assert_eq!(Error::SelectionCancelled.exit_code(), 1);
        assert_eq!(Error::malformed_selection("x").exit_code(), 1);
    }

    #[test]
    fn test_tool_not_found_mentions_hint() {
        let err = Error::tool_not_found("fzf", "Install it with: pkg install fzf");
        let text = err.to_string();
        assert!(text.contains("fzf"));
        assert!(text.contains("pkg install fzf"));
    }

    #[test]
    fn test_context_passes_error_through() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = res.context("reading config").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
