//! Error types for `truthwire`.
//!
//! Domain-specific error enums plus a top-level aggregate that maps each
//! failure class to a process exit code.

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for `truthwire` CLI operations, following Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    pub const ERROR: i32 = 1;

    /// Configuration error (invalid YAML, validation failure).
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied).
    pub const IO_ERROR: i32 = 3;

    /// Feed error (malformed event, connection failure).
    pub const FEED_ERROR: i32 = 4;

    /// Usage error (invalid arguments).
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C).
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM.
    pub const TERMINATED: i32 = 143;
}

/// Top-level error type aggregating all domain errors.
#[derive(Debug, Error)]
pub enum TruthwireError {
    /// Configuration loading or validation error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Event feed error.
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TruthwireError {
    /// Returns the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => ExitCode::CONFIG_ERROR,
            Self::Feed(_) => ExitCode::FEED_ERROR,
            Self::Io(_) | Self::Json(_) => ExitCode::IO_ERROR,
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// YAML parsing failed.
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Error message from the parser.
        message: String,
    },

    /// A field has an invalid value.
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the offending field.
        field: String,
        /// The actual value provided.
        value: String,
        /// Description of what was expected.
        expected: String,
    },

    /// I/O failure while reading configuration.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Event feed boundary errors.
///
/// Malformed inbound events are rejected here, before the state machine
/// sees them; they never become silent coercions.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Inbound message was not valid JSON or had the wrong shape.
    #[error("malformed event: {0}")]
    Malformed(String),

    /// Player index other than 1 or 2, carried as the raw JSON value.
    #[error("unknown player index: {0}")]
    UnknownPlayer(String),

    /// A required field was absent.
    #[error("missing field '{0}'")]
    MissingField(&'static str),

    /// Unrecognized event kind.
    #[error("unknown event kind: {0}")]
    UnknownEvent(String),

    /// Answer value outside the configured vocabulary.
    #[error("answer '{value}' not in vocabulary {vocabulary:?}")]
    UnknownAnswer {
        /// The rejected value.
        value: String,
        /// Accepted answer values.
        vocabulary: Vec<String>,
    },

    /// Connection to the feed source failed.
    #[error("feed connection failed: {0}")]
    ConnectionFailed(String),

    /// The feed was already started; only one subscription may be active.
    #[error("feed already started")]
    AlreadyStarted,

    /// I/O error on the feed transport.
    #[error("feed I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for `truthwire` operations.
pub type Result<T> = std::result::Result<T, TruthwireError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::SUCCESS, 0);
        assert_eq!(ExitCode::CONFIG_ERROR, 2);
        assert_eq!(ExitCode::IO_ERROR, 3);
        assert_eq!(ExitCode::FEED_ERROR, 4);
        assert_eq!(ExitCode::INTERRUPTED, 130);
        assert_eq!(ExitCode::TERMINATED, 143);
    }

    #[test]
    fn test_config_error_exit_code() {
        let err: TruthwireError = ConfigError::MissingFile {
            path: PathBuf::from("/missing.yaml"),
        }
        .into();
        assert_eq!(err.exit_code(), ExitCode::CONFIG_ERROR);
    }

    #[test]
    fn test_feed_error_exit_code() {
        let err: TruthwireError = FeedError::UnknownPlayer("7".into()).into();
        assert_eq!(err.exit_code(), ExitCode::FEED_ERROR);
    }

    #[test]
    fn test_io_error_exit_code() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: TruthwireError = io.into();
        assert_eq!(err.exit_code(), ExitCode::IO_ERROR);
    }

    #[test]
    fn test_unknown_answer_display() {
        let err = FeedError::UnknownAnswer {
            value: "Maybe".into(),
            vocabulary: vec!["Ja".into(), "Nein".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("Maybe"));
        assert!(msg.contains("Ja"));
    }
}
