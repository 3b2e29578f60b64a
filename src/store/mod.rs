//! Response store module.
//!
//! A response store maps a request identity and an exact status code to a
//! recorded [`ServerResponse`]. The default backend is [`DiskStore`], which
//! addresses records by the MD5 fingerprint of the request; [`MemoryStore`]
//! and [`CachedStore`] implement the same [`ResponseStore`] capability.

#[cfg(feature = "cache")]
mod cached;
mod disk;
mod error;
mod fingerprint;
mod format;
mod memory;
mod types;

use std::sync::Arc;

#[cfg(feature = "cache")]
pub use cached::CachedStore;
pub use disk::{DiskStore, FixtureEntry, VerifyReport};
pub use error::StoreError;
pub use fingerprint::{FINGERPRINT_LEN, FingerprintKey, canonicalize};
pub use format::StoredResponseRecord;
pub use memory::MemoryStore;
pub use types::{RequestIdentity, RequestMethod, ServerResponse};

/// Read-side capability shared by every backend.
///
/// Implementations must be stateless per call from the caller's point of
/// view: the same inputs against unchanged storage give the same answer.
pub trait ResponseStore: Send + Sync {
    /// Resolve the response recorded for `identity` with exactly `status`.
    ///
    /// `Ok(None)` means nothing matches. Errors are reserved for unusable
    /// storage, invalid input, and records that exist but cannot be decoded.
    fn read(
        &self,
        identity: &RequestIdentity,
        status: u16,
    ) -> Result<Option<ServerResponse>, StoreError>;
}

impl<S: ResponseStore + ?Sized> ResponseStore for Arc<S> {
    fn read(
        &self,
        identity: &RequestIdentity,
        status: u16,
    ) -> Result<Option<ServerResponse>, StoreError> {
        (**self).read(identity, status)
    }
}

impl<S: ResponseStore + ?Sized> ResponseStore for Box<S> {
    fn read(
        &self,
        identity: &RequestIdentity,
        status: u16,
    ) -> Result<Option<ServerResponse>, StoreError> {
        (**self).read(identity, status)
    }
}
