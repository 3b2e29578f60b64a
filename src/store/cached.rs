//! Memoizing wrapper around another response store.
//!
//! Both hits and misses are remembered, so a lookup touches the inner store at
//! most once per `(identity, status)` until [`CachedStore::clear`] is called.
//! Errors are returned as-is and never cached.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::logging::trace;

use super::ResponseStore;
use super::error::StoreError;
use super::types::{RequestIdentity, ServerResponse};

type CacheKey = (RequestIdentity, u16);

#[derive(Debug)]
pub struct CachedStore<S> {
    inner: S,
    entries: RwLock<HashMap<CacheKey, Option<ServerResponse>>>,
}

impl<S: ResponseStore> CachedStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Number of cached lookups, present or absent.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl<S: ResponseStore> ResponseStore for CachedStore<S> {
    fn read(
        &self,
        identity: &RequestIdentity,
        status: u16,
    ) -> Result<Option<ServerResponse>, StoreError> {
        let key = (identity.clone(), status);

        if let Some(cached) = self.entries.read().get(&key) {
            trace!(%identity, status, "cache hit");
            return Ok(cached.clone());
        }

        // The inner read runs without the lock; a concurrent miss on the same
        // key computes the same value and the first insert wins.
        let loaded = self.inner.read(identity, status)?;
        let mut entries = self.entries.write();
        Ok(entries.entry(key).or_insert(loaded).clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Barrier};
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::store::MemoryStore;
    use crate::store::types::RequestMethod;

    /// Counts reads that reach the wrapped store. With a barrier, every read
    /// blocks until the expected number of readers are inside at once.
    struct Counting {
        inner: MemoryStore,
        reads: AtomicUsize,
        barrier: Option<Barrier>,
    }

    impl ResponseStore for Counting {
        fn read(
            &self,
            identity: &RequestIdentity,
            status: u16,
        ) -> Result<Option<ServerResponse>, StoreError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if let Some(barrier) = &self.barrier {
                barrier.wait();
            }
            self.inner.read(identity, status)
        }
    }

    fn foo() -> RequestIdentity {
        RequestIdentity::new(RequestMethod::Get, "/foo").unwrap()
    }

    fn counting() -> Counting {
        Counting {
            inner: MemoryStore::new().with(foo(), ServerResponse::new(200, vec![], b"ok".to_vec())),
            reads: AtomicUsize::new(0),
            barrier: None,
        }
    }

    #[test]
    fn test_hits_and_misses_are_cached() {
        let store = CachedStore::new(counting());

        for _ in 0..3 {
            assert_eq!(store.read(&foo(), 200).unwrap().unwrap().body, b"ok");
            assert_eq!(store.read(&foo(), 404).unwrap(), None);
        }
        assert_eq!(store.inner().reads.load(Ordering::SeqCst), 2);
        assert_eq!(store.len(), 2);

        store.clear();
        assert!(store.is_empty());
        store.read(&foo(), 200).unwrap();
        assert_eq!(store.inner().reads.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let store = CachedStore::new(counting());
        assert!(store.read(&foo(), 42).is_err());
        assert!(store.read(&foo(), 42).is_err());
        assert!(store.is_empty());
        assert_eq!(store.inner().reads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_overlapping_misses_agree() {
        const READERS: usize = 8;
        let store = Arc::new(CachedStore::new(Counting {
            barrier: Some(Barrier::new(READERS)),
            ..counting()
        }));

        let handles: Vec<_> = (0..READERS)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.read(&foo(), 200).unwrap())
            })
            .collect();

        let responses: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap().unwrap())
            .collect();

        // Every reader missed before any of them inserted.
        assert_eq!(store.inner().reads.load(Ordering::SeqCst), READERS);
        assert_eq!(store.len(), 1);
        let first = responses.first().unwrap();
        assert!(responses.iter().all(|r| r == first));
        assert_eq!(first.body, b"ok");

        // Now cached: no further inner reads, and no barrier wait.
        assert_eq!(&store.read(&foo(), 200).unwrap().unwrap(), first);
        assert_eq!(store.inner().reads.load(Ordering::SeqCst), READERS);
    }
}
