//! Error types for the lgv application.
//!
//! Errors follow a small hierarchy built with `thiserror`, composing via `?`
//! and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - top-level startup/shell error
//!   - [`SourceError`] - log source failures (missing root, I/O, bad page token)
//!   - [`crate::config::ConfigError`] - configuration file failures
//!   - [`crate::logging::LoggingError`] - tracing subscriber setup failures
//!   - `std::io::Error` - terminal failures
//!
//! # Recovery Strategy
//!
//! Only startup errors are fatal. A [`SourceError`] raised by
//! `Cursor::next_page` while the UI is running is converted into inline pane
//! status text so the user can retry; it never ends the session. Clipboard
//! failures are reported the same way. Malformed JSON inside a message is not
//! an error at all: the formatter falls back to the raw text.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// Returned from startup and the terminal shell. Every variant is fatal and
/// ends the process with a non-zero exit code.
#[derive(Debug, Error)]
pub enum AppError {
    /// The log source could not be opened (e.g. the log root is missing).
    #[error("Log source unavailable: {0}")]
    Source(#[from] SourceError),

    /// The configuration file exists but could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors raised while fetching groups, streams or events.
///
/// A fetch failure is always reported as an error, never silently treated as
/// the end of data: callers must be able to distinguish "no more pages" from
/// "the request failed".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The configured log root does not exist or is not a directory.
    ///
    /// **When this occurs**: at startup when opening a `DirectorySource`.
    ///
    /// **Recovery**: none; the application exits with a non-zero status.
    #[error("Log root not found: {path}")]
    RootNotFound {
        /// The root directory that was attempted.
        path: PathBuf,
    },

    /// The group or stream named in a request does not exist.
    ///
    /// **When this occurs**: a group directory or stream file was removed
    /// between listing and fetching, or the CLI named an unknown group.
    #[error("Not found: {name}")]
    NotFound {
        /// Group or stream name as requested.
        name: String,
    },

    /// Reading from the source failed.
    ///
    /// `io::Error` is not `Clone`, so the reason is captured as text.
    #[error("Failed to read {path}: {reason}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Reason reported by the OS.
        reason: String,
    },

    /// A page token handed back to the source could not be interpreted.
    #[error("Invalid page token: {0}")]
    InvalidToken(String),

    /// The source refused or failed the request for another reason.
    #[error("Request failed: {0}")]
    Unavailable(String),
}

impl SourceError {
    /// Build an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        SourceError::Io {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_not_found_message_contains_path() {
        let err = SourceError::RootNotFound {
            path: PathBuf::from("/var/log/missing"),
        };
        assert!(err.to_string().contains("/var/log/missing"));
    }

    #[test]
    fn io_helper_captures_reason() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = SourceError::io("/tmp/x", &io);
        assert_eq!(
            err,
            SourceError::Io {
                path: PathBuf::from("/tmp/x"),
                reason: "denied".to_string()
            }
        );
    }

    #[test]
    fn source_error_converts_into_app_error() {
        fn open() -> Result<(), AppError> {
            Err(SourceError::InvalidToken("abc".into()))?
        }
        assert!(matches!(open(), Err(AppError::Source(_))));
    }

    #[test]
    fn io_error_converts_into_terminal_error() {
        let app: AppError = std::io::Error::other("boom").into();
        assert!(matches!(app, AppError::Terminal(_)));
    }
}
