//! Deterministic lookup of recorded HTTP responses for test fixtures.
//!
//! Responses recorded earlier are kept on disk, addressed by an MD5
//! fingerprint of the request method and URI, with one file per recorded
//! status code. Tests ask for a response by method, URI and the status they
//! expect; nothing touches the network.
//!
//! # Quick Start
//!
//! ```ignore
//! use mockstash::prelude::*;
//!
//! let loader = MockLoader::new("tests/fixtures/mocks")?;
//! match loader.get_mock_for(RequestMethod::Get, "http://www.vg.no/index.php", 200)? {
//!     Some(response) => assert_eq!(response.header("content-type"), Some("text/html")),
//!     None => panic!("fixture missing"),
//! }
//! ```
//!
//! # Modules
//!
//! - [`store`] - Fingerprinting, the record format and the store backends
//! - [`loader`] - The [`MockLoader`] façade used by tests
//! - [`config`] - CLI configuration file (requires `cli` feature)
//!
//! # Feature Flags
//!
//! - `cache` - Enable [`store::CachedStore`] (enabled by default)
//! - `http` - Convert [`ServerResponse`] into `http::Response<Vec<u8>>`
//! - `logging` - Enable library-level tracing (consumers provide their own subscriber)
//! - `cli` - Enable the `mockstash` command-line binary
//! - `full` - Enable all features

#[cfg(feature = "cli")]
pub mod config;
pub mod loader;
mod logging;
pub mod prelude;
pub mod store;

mod error;

// Re-export the unified error type
pub use error::{Error, Result};

pub use loader::MockLoader;
#[cfg(feature = "cache")]
pub use store::CachedStore;
pub use store::{
    DiskStore, FingerprintKey, MemoryStore, RequestIdentity, RequestMethod, ResponseStore,
    ServerResponse, StoreError, StoredResponseRecord,
};
