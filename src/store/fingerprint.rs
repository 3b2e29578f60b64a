//! Content addressing for request identities.
//!
//! A [`FingerprintKey`] is the MD5 digest of the canonical form
//! `"<METHOD> <uri>"`, written as 32 lowercase hex characters. The method is
//! always upper case; the URI is used exactly as given. The key is safe to use
//! as a directory name and has a fixed length whatever the URI size.

use std::fmt;
use std::str::FromStr;

use super::error::StoreError;
use super::types::RequestIdentity;

/// Length of a fingerprint in hex characters.
pub const FINGERPRINT_LEN: usize = 32;

/// Separator between method and URI in the canonical form.
const CANONICAL_SEPARATOR: char = ' ';

/// Build the canonical string that gets hashed for an identity.
pub fn canonicalize(identity: &RequestIdentity) -> String {
    let method = identity.method().as_str();
    let uri = identity.uri();
    let mut canonical = String::with_capacity(method.len() + 1 + uri.len());
    canonical.push_str(method);
    canonical.push(CANONICAL_SEPARATOR);
    canonical.push_str(uri);
    canonical
}

/// Deterministic storage key of a request identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FingerprintKey(String);

impl FingerprintKey {
    /// Fingerprint an identity.
    pub fn of(identity: &RequestIdentity) -> Self {
        let digest = md5::compute(canonicalize(identity).as_bytes());
        Self(format!("{:x}", digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_valid(s: &str) -> bool {
        s.len() == FINGERPRINT_LEN
            && s.bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }
}

impl fmt::Display for FingerprintKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FingerprintKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for FingerprintKey {
    type Err = StoreError;

    /// Accepts an existing fingerprint, e.g. a directory name under the root.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_valid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(StoreError::InvalidIdentity(format!(
                "`{}` is not a {}-character lowercase hex fingerprint",
                s, FINGERPRINT_LEN
            )))
        }
    }
}
