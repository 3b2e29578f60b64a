//! Convenient re-exports for common usage patterns.
//!
//! ```ignore
//! use mockstash::prelude::*;
//!
//! let loader = MockLoader::new("tests/fixtures/mocks")?;
//! let response = loader.get_mock_for(RequestMethod::Get, "/api/items", 200)?;
//! ```

// Unified error handling
pub use crate::error::{Error, Result};

pub use crate::loader::MockLoader;

// Store types
#[cfg(feature = "cache")]
pub use crate::store::CachedStore;
pub use crate::store::{
    DiskStore, FingerprintKey, MemoryStore, RequestIdentity, RequestMethod, ResponseStore,
    ServerResponse, StoreError, StoredResponseRecord,
};
