//! Content-addressed disk store.
//!
//! Layout under the storage root:
//!
//! ```text
//! <root>/
//!   <fingerprint>/
//!     200.json
//!     404.json
//! ```
//!
//! One directory per request identity, one file per recorded status.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::logging::{debug, info, trace, warn};

use super::ResponseStore;
use super::error::StoreError;
use super::fingerprint::FingerprintKey;
use super::format::StoredResponseRecord;
use super::types::{RequestIdentity, ServerResponse};

/// Extension of record files.
const RECORD_EXTENSION: &str = "json";

/// Read-only store over a directory of recorded responses.
#[derive(Debug, Clone)]
pub struct DiskStore {
    root: PathBuf,
}

/// A record file found by [`DiskStore::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureEntry {
    pub fingerprint: FingerprintKey,
    pub status: u16,
    pub path: PathBuf,
}

/// Outcome of [`DiskStore::verify`].
#[derive(Debug, Default)]
pub struct VerifyReport {
    /// Number of record files inspected.
    pub checked: usize,
    /// Records that failed to load, with the reason.
    pub problems: Vec<(PathBuf, StoreError)>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Reject status codes outside the HTTP range before touching the disk.
pub(crate) fn check_status(status: u16) -> Result<(), StoreError> {
    if (100..=599).contains(&status) {
        Ok(())
    } else {
        Err(StoreError::InvalidStatus(status))
    }
}

impl DiskStore {
    /// Open a store rooted at `root`.
    ///
    /// The root must be an existing, readable directory. A missing root is a
    /// configuration error, not an empty store.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref();

        let metadata = fs::metadata(root).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StoreError::RootNotFound(root.to_path_buf()),
            _ => StoreError::RootUnreadable {
                path: root.to_path_buf(),
                source: e,
            },
        })?;
        if !metadata.is_dir() {
            return Err(StoreError::InvalidRoot(root.to_path_buf()));
        }

        // Listing proves we may traverse it.
        fs::read_dir(root).map_err(|e| StoreError::RootUnreadable {
            path: root.to_path_buf(),
            source: e,
        })?;

        debug!(root = %root.display(), "opened response store");
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding every status variant of `identity`.
    pub fn fingerprint_dir(&self, identity: &RequestIdentity) -> PathBuf {
        self.root.join(FingerprintKey::of(identity).as_str())
    }

    /// File that holds (or would hold) the record for `identity` and `status`.
    pub fn record_path(&self, identity: &RequestIdentity, status: u16) -> PathBuf {
        self.fingerprint_dir(identity)
            .join(format!("{}.{}", status, RECORD_EXTENSION))
    }

    /// Resolve a stored response.
    ///
    /// Returns `Ok(None)` when nothing was recorded for this identity, or when
    /// the identity was recorded but never with exactly `status`.
    pub fn read(
        &self,
        identity: &RequestIdentity,
        status: u16,
    ) -> Result<Option<ServerResponse>, StoreError> {
        check_status(status)?;

        let dir = self.fingerprint_dir(identity);
        match fs::metadata(&dir) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(StoreError::corrupt(
                    &dir,
                    "fingerprint entry is not a directory",
                ));
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!(%identity, dir = %dir.display(), "no fingerprint directory");
                return Ok(None);
            }
            Err(e) => return Err(StoreError::io(&dir, e)),
        }

        let path = self.record_path(identity, status);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(%identity, status, "identity recorded without this status");
                return Ok(None);
            }
            Err(e) => return Err(StoreError::io(&path, e)),
        };

        let record = StoredResponseRecord::decode(&bytes, &path)?;
        if &record.identity != identity {
            return Err(StoreError::IdentityMismatch {
                path,
                expected: identity.to_string(),
                found: record.identity.to_string(),
            });
        }
        if record.response.status != status {
            return Err(StoreError::corrupt(
                &path,
                format!(
                    "file is named for status {} but records status {}",
                    status, record.response.status
                ),
            ));
        }

        debug!(%identity, status, path = %path.display(), "loaded recorded response");
        Ok(Some(record.response))
    }

    /// Every record file under the root, sorted by fingerprint then status.
    ///
    /// Files and directories that do not follow the layout are skipped.
    pub fn list(&self) -> Result<Vec<FixtureEntry>, StoreError> {
        let mut entries = Vec::new();

        for dir_entry in read_dir(&self.root)? {
            let dir_path = dir_entry.path();
            let Some(fingerprint) = dir_entry
                .file_name()
                .to_str()
                .and_then(|name| name.parse::<FingerprintKey>().ok())
            else {
                warn!(path = %dir_path.display(), "skipping entry that is not a fingerprint");
                continue;
            };
            if !dir_path.is_dir() {
                warn!(path = %dir_path.display(), "skipping fingerprint that is not a directory");
                continue;
            }

            for file_entry in read_dir(&dir_path)? {
                let path = file_entry.path();
                let Some(status) = status_from_file_name(&path) else {
                    warn!(path = %path.display(), "skipping file that is not a status record");
                    continue;
                };
                entries.push(FixtureEntry {
                    fingerprint: fingerprint.clone(),
                    status,
                    path,
                });
            }
        }

        entries.sort_by(|a, b| {
            a.fingerprint
                .cmp(&b.fingerprint)
                .then(a.status.cmp(&b.status))
        });
        Ok(entries)
    }

    /// Load every listed record and check it lives where its identity hashes.
    pub fn verify(&self) -> Result<VerifyReport, StoreError> {
        let mut report = VerifyReport::default();

        for entry in self.list()? {
            report.checked += 1;
            if let Err(e) = self.verify_entry(&entry) {
                warn!(path = %entry.path.display(), error = %e, "record failed verification");
                report.problems.push((entry.path, e));
            }
        }

        info!(
            checked = report.checked,
            problems = report.problems.len(),
            "verified fixture directory"
        );
        Ok(report)
    }

    /// Decode a listed entry without knowing its identity up front.
    pub fn load_entry(&self, entry: &FixtureEntry) -> Result<StoredResponseRecord, StoreError> {
        let bytes = fs::read(&entry.path).map_err(|e| StoreError::io(&entry.path, e))?;
        StoredResponseRecord::decode(&bytes, &entry.path)
    }

    fn verify_entry(&self, entry: &FixtureEntry) -> Result<(), StoreError> {
        let record = self.load_entry(entry)?;
        let actual = FingerprintKey::of(&record.identity);
        if actual != entry.fingerprint {
            return Err(StoreError::IdentityMismatch {
                path: entry.path.clone(),
                expected: entry.fingerprint.to_string(),
                found: format!("{} ({})", record.identity, actual),
            });
        }
        if record.response.status != entry.status {
            return Err(StoreError::corrupt(
                &entry.path,
                format!(
                    "file is named for status {} but records status {}",
                    entry.status, record.response.status
                ),
            ));
        }
        Ok(())
    }
}

impl ResponseStore for DiskStore {
    fn read(
        &self,
        identity: &RequestIdentity,
        status: u16,
    ) -> Result<Option<ServerResponse>, StoreError> {
        DiskStore::read(self, identity, status)
    }
}

fn read_dir(path: &Path) -> Result<Vec<fs::DirEntry>, StoreError> {
    fs::read_dir(path)
        .and_then(|entries| entries.collect::<Result<Vec<_>, _>>())
        .map_err(|e| StoreError::io(path, e))
}

fn status_from_file_name(path: &Path) -> Option<u16> {
    if path.extension()?.to_str()? != RECORD_EXTENSION {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let status: u16 = stem.parse().ok()?;
    check_status(status).ok()?;
    // `+200` and `0200` parse too, but `read` only ever opens `200.json`.
    (stem == status.to_string()).then_some(status)
}
