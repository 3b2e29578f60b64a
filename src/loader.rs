//! Mock loader: the entry point test code uses to fetch recorded responses.
//!
//! ```ignore
//! use mockstash::prelude::*;
//!
//! let loader = MockLoader::new("tests/fixtures/mocks")?;
//! let response = loader.get_mock_for(RequestMethod::Get, "http://www.vg.no/index.php", 200)?;
//! ```

use std::path::Path;

use crate::error::Result;
use crate::store::{DiskStore, RequestIdentity, RequestMethod, ResponseStore, ServerResponse};

/// Looks up recorded responses by method, URI and expected status.
pub struct MockLoader {
    store: Box<dyn ResponseStore>,
}

impl MockLoader {
    /// Loader over a fixture directory, using the fingerprinted disk layout.
    pub fn new(folder: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::with_store(DiskStore::open(folder)?))
    }

    /// Loader over any response store.
    pub fn with_store(store: impl ResponseStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Fetch the response recorded for `method` and `uri` with exactly
    /// `status`, or `None` if no such mock exists.
    ///
    /// The URI must be byte-for-byte the one used when recording.
    pub fn get_mock_for(
        &self,
        method: RequestMethod,
        uri: &str,
        status: u16,
    ) -> Result<Option<ServerResponse>> {
        let identity = RequestIdentity::new(method, uri)?;
        Ok(self.store.read(&identity, status)?)
    }
}

impl std::fmt::Debug for MockLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockLoader").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_delegates_to_store() {
        let identity = RequestIdentity::new(RequestMethod::Get, "/foo").unwrap();
        let loader = MockLoader::with_store(
            MemoryStore::new().with(identity, ServerResponse::new(200, vec![], b"hi".to_vec())),
        );

        let found = loader.get_mock_for(RequestMethod::Get, "/foo", 200).unwrap();
        assert_eq!(found.map(|r| r.body), Some(b"hi".to_vec()));
        assert_eq!(loader.get_mock_for(RequestMethod::Get, "/foo", 404).unwrap(), None);
    }

    #[test]
    fn test_empty_uri_is_invalid_input() {
        let loader = MockLoader::with_store(MemoryStore::new());
        let err = loader.get_mock_for(RequestMethod::Get, "", 200).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
