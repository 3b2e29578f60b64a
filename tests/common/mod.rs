//! Common test utilities and fixtures.
//!
//! [`FixtureDir`] owns a temporary storage root and writes records into it
//! using the same layout and format the stores read.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use mockstash::{
    DiskStore, RequestIdentity, RequestMethod, ServerResponse, StoredResponseRecord,
};

/// A temporary storage root with helpers for writing records.
pub struct FixtureDir {
    temp_dir: TempDir,
    store: DiskStore,
}

impl FixtureDir {
    /// Create an empty storage root.
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = TempDir::new()?;
        let store = DiskStore::open(temp_dir.path())?;
        Ok(Self { temp_dir, store })
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn store(&self) -> &DiskStore {
        &self.store
    }

    /// Write `response` as the record for `identity`, returning its path.
    pub fn write(
        &self,
        identity: &RequestIdentity,
        response: &ServerResponse,
    ) -> anyhow::Result<PathBuf> {
        let record = StoredResponseRecord::new(identity.clone(), response.clone());
        let path = self.store.record_path(identity, response.status);
        self.write_raw(&path, &record.encode()?)?;
        Ok(path)
    }

    /// Write arbitrary bytes at a record location.
    pub fn write_raw(&self, path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)?;
        Ok(())
    }
}

pub fn identity(method: RequestMethod, uri: &str) -> RequestIdentity {
    RequestIdentity::new(method, uri).unwrap_or_else(|e| panic!("bad identity {uri}: {e}"))
}

/// A text response with a content type.
pub fn text_response(status: u16, body: &str) -> ServerResponse {
    ServerResponse::new(
        status,
        vec![
            ("Content-Type".to_string(), "text/plain; charset=utf-8".to_string()),
            ("X-Recorded-By".to_string(), "tests".to_string()),
        ],
        body.as_bytes().to_vec(),
    )
}
