//! Core error types for fathom-sync.
//!
//! Every variant is terminal for a sync run: nothing is retried internally and
//! the binary maps any of them to a non-zero exit code.

use std::path::PathBuf;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the sync pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// No configuration file was found walking up from the start directory.
    #[error("No fathom configuration file found in {} or any parent directory", .0.display())]
    ConfigurationMissing(PathBuf),

    /// The configuration file exists but could not be understood.
    #[error("Malformed configuration file {}: {reason}", .path.display())]
    ConfigurationMalformed { path: PathBuf, reason: String },

    /// A request to the remote registry failed (transport, non-2xx status or
    /// undecodable body).
    #[error("Remote registry unavailable: {0}")]
    RemoteUnavailable(String),

    /// A generated artifact or the configuration file could not be written.
    #[error("Failed to write {}: {reason}", .path.display())]
    PersistenceFailure { path: PathBuf, reason: String },

    #[error("Invalid event name: {0}")]
    InvalidEventName(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Builds a [`Error::PersistenceFailure`] for `path` from any displayable cause.
    pub fn persistence(path: impl Into<PathBuf>, cause: impl std::fmt::Display) -> Self {
        Error::PersistenceFailure {
            path: path.into(),
            reason: cause.to_string(),
        }
    }

    /// Builds a [`Error::ConfigurationMalformed`] for `path`.
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::ConfigurationMalformed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_configuration_message_names_directory() {
        let err = Error::ConfigurationMissing(PathBuf::from("/work/app"));
        assert_eq!(
            err.to_string(),
            "No fathom configuration file found in /work/app or any parent directory"
        );
    }

    #[test]
    fn test_persistence_helper() {
        let err = Error::persistence("/tmp/out/types.ts", "disk full");
        assert!(matches!(err, Error::PersistenceFailure { .. }));
        assert_eq!(err.to_string(), "Failed to write /tmp/out/types.ts: disk full");
    }
}
