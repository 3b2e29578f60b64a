//! Unified error type for the mockstash library.
//!
//! [`Error`] wraps the module-specific errors so applications can use a
//! single type with `?`.

use thiserror::Error;

#[cfg(feature = "cli")]
use crate::config::ConfigError;
use crate::store::StoreError;

/// Unified error type for all mockstash operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from resolving or decoding a stored response.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Error loading the CLI configuration file.
    #[cfg(feature = "cli")]
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A [`Result`] type alias using the unified [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if this is a store error.
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }

    /// Returns `true` if the storage root or configuration is unusable.
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::Store(e) => e.is_configuration(),
            #[cfg(feature = "cli")]
            Self::Config(_) => true,
        }
    }

    /// Returns `true` if a located record could not be trusted.
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_corruption())
    }

    /// Returns `true` if the caller passed a method, URI or status that can
    /// never match.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_invalid_input())
    }
}
