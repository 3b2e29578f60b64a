//! Request identity and response types shared by every store.

use std::fmt;
use std::str::FromStr;

use super::error::StoreError;

/// HTTP request method of a recorded exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RequestMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Trace,
    Connect,
}

impl RequestMethod {
    /// Every supported method, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Get,
        Self::Head,
        Self::Post,
        Self::Put,
        Self::Patch,
        Self::Delete,
        Self::Options,
        Self::Trace,
        Self::Connect,
    ];

    /// Canonical upper-case name, as used in fingerprints and record files.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
            Self::Connect => "CONNECT",
        }
    }
}

impl fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestMethod {
    type Err = StoreError;

    /// Parses a method name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| StoreError::UnknownMethod(s.to_string()))
    }
}

/// What was requested: method plus the exact URI used at record time.
///
/// The URI is kept verbatim. Query ordering, trailing slashes and
/// percent-encoding all take part in equality and fingerprinting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestIdentity {
    method: RequestMethod,
    uri: String,
}

impl RequestIdentity {
    /// Create an identity, rejecting an empty URI.
    pub fn new(method: RequestMethod, uri: impl Into<String>) -> Result<Self, StoreError> {
        let uri = uri.into();
        if uri.is_empty() {
            return Err(StoreError::InvalidIdentity(
                "request URI cannot be empty".to_string(),
            ));
        }
        Ok(Self { method, uri })
    }

    pub fn method(&self) -> RequestMethod {
        self.method
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

impl fmt::Display for RequestIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.uri)
    }
}

/// A recorded response, reconstructed from storage.
///
/// Headers keep their recorded order and duplicates. The caller owns the
/// value; stores keep no reference to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ServerResponse {
    pub fn new(status: u16, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// First value of the named header, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// All values of the named header, in recorded order.
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body as UTF-8 text, if it is valid UTF-8.
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

#[cfg(feature = "http")]
impl TryFrom<ServerResponse> for http::Response<Vec<u8>> {
    type Error = http::Error;

    fn try_from(response: ServerResponse) -> Result<Self, Self::Error> {
        let mut builder = http::Response::builder().status(response.status);
        for (name, value) in &response.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder.body(response.body)
    }
}
