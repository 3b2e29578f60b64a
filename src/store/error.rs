//! Error types for the response store module.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving a stored response.
///
/// A missing fixture is not an error; stores report it as `Ok(None)`.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Storage root is not a directory: {}", .0.display())]
    InvalidRoot(PathBuf),

    #[error("Storage root {} is not readable: {source}", .path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt record at {}: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error(
        "Unsupported record format at {}: found {found}, expected {expected}",
        .path.display()
    )]
    UnsupportedFormat {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("Record at {} belongs to `{found}`, not `{expected}`", .path.display())]
    IdentityMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    #[error("Cannot encode record: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Invalid request identity: {0}")]
    InvalidIdentity(String),

    #[error("Invalid HTTP status code: {0}")]
    InvalidStatus(u16),

    #[error("Unknown HTTP method: {0}")]
    UnknownMethod(String),
}

impl StoreError {
    /// The storage root itself is unusable.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::RootNotFound(_) | Self::InvalidRoot(_) | Self::RootUnreadable { .. }
        )
    }

    /// A record was located but cannot be trusted.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::Corrupt { .. } | Self::UnsupportedFormat { .. } | Self::IdentityMismatch { .. }
        )
    }

    /// The caller passed a method, URI or status that can never match.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidIdentity(_) | Self::InvalidStatus(_) | Self::UnknownMethod(_)
        )
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
