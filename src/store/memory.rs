//! In-memory response store, for exercising code that takes a
//! [`ResponseStore`] without writing fixture files.

use std::collections::HashMap;

use super::ResponseStore;
use super::disk::check_status;
use super::error::StoreError;
use super::format::StoredResponseRecord;
use super::types::{RequestIdentity, ServerResponse};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<(RequestIdentity, u16), ServerResponse>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a response under its own status. Replaces any earlier entry.
    pub fn insert(&mut self, identity: RequestIdentity, response: ServerResponse) {
        self.records.insert((identity, response.status), response);
    }

    pub fn insert_record(&mut self, record: StoredResponseRecord) {
        self.insert(record.identity, record.response);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, identity: RequestIdentity, response: ServerResponse) -> Self {
        self.insert(identity, response);
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<StoredResponseRecord> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = StoredResponseRecord>>(iter: I) -> Self {
        let mut store = Self::new();
        for record in iter {
            store.insert_record(record);
        }
        store
    }
}

impl ResponseStore for MemoryStore {
    fn read(
        &self,
        identity: &RequestIdentity,
        status: u16,
    ) -> Result<Option<ServerResponse>, StoreError> {
        check_status(status)?;
        Ok(self.records.get(&(identity.clone(), status)).cloned())
    }
}
