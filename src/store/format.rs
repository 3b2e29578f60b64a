//! On-disk record format.
//!
//! Each record is a UTF-8 JSON document:
//!
//! ```json
//! {
//!   "format": 1,
//!   "method": "GET",
//!   "uri": "http://www.vg.no/index.php",
//!   "status": 200,
//!   "headers": [["Content-Type", "text/html"]],
//!   "body": "<html></html>"
//! }
//! ```
//!
//! Text bodies go in `body`; bodies that are not valid UTF-8 go in
//! `body_base64` (standard alphabet, padded). A document with neither has an
//! empty body. Unknown fields are rejected.

use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use super::error::StoreError;
use super::types::{RequestIdentity, RequestMethod, ServerResponse};

/// JSON document as written on disk.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecordDocument {
    format: u32,
    method: String,
    uri: String,
    status: u16,
    #[serde(default)]
    headers: Vec<(String, String)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    body_base64: Option<String>,
}

/// A recorded exchange: which request it answers and the response itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredResponseRecord {
    pub identity: RequestIdentity,
    pub response: ServerResponse,
}

impl StoredResponseRecord {
    /// Current format version
    pub const CURRENT_FORMAT: u32 = 1;

    pub fn new(identity: RequestIdentity, response: ServerResponse) -> Self {
        Self { identity, response }
    }

    /// Encode the record as a pretty-printed JSON document.
    pub fn encode(&self) -> Result<Vec<u8>, StoreError> {
        let (body, body_base64) = match std::str::from_utf8(&self.response.body) {
            Ok(_) if self.response.body.is_empty() => (None, None),
            Ok(text) => (Some(text.to_string()), None),
            Err(_) => (None, Some(BASE64.encode(&self.response.body))),
        };

        let document = RecordDocument {
            format: Self::CURRENT_FORMAT,
            method: self.identity.method().to_string(),
            uri: self.identity.uri().to_string(),
            status: self.response.status,
            headers: self.response.headers.clone(),
            body,
            body_base64,
        };

        let mut bytes = serde_json::to_vec_pretty(&document).map_err(StoreError::Encode)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    /// Decode a record read from `path`. The path is only used in errors.
    pub fn decode(bytes: &[u8], path: &Path) -> Result<Self, StoreError> {
        let document: RecordDocument = serde_json::from_slice(bytes)
            .map_err(|e| StoreError::corrupt(path, format!("invalid record JSON: {}", e)))?;

        if document.format != Self::CURRENT_FORMAT {
            return Err(StoreError::UnsupportedFormat {
                path: path.to_path_buf(),
                found: document.format,
                expected: Self::CURRENT_FORMAT,
            });
        }

        let method: RequestMethod = document
            .method
            .parse()
            .map_err(|e| StoreError::corrupt(path, format!("{}", e)))?;
        let identity = RequestIdentity::new(method, document.uri)
            .map_err(|e| StoreError::corrupt(path, format!("{}", e)))?;

        if !(100..=599).contains(&document.status) {
            return Err(StoreError::corrupt(
                path,
                format!("status {} is not a valid HTTP status", document.status),
            ));
        }

        let body = match (document.body, document.body_base64) {
            (Some(_), Some(_)) => {
                return Err(StoreError::corrupt(
                    path,
                    "both `body` and `body_base64` are present",
                ));
            }
            (Some(text), None) => text.into_bytes(),
            (None, Some(encoded)) => BASE64
                .decode(encoded.trim())
                .map_err(|e| StoreError::corrupt(path, format!("invalid body_base64: {}", e)))?,
            (None, None) => Vec::new(),
        };

        Ok(Self {
            identity,
            response: ServerResponse::new(document.status, document.headers, body),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> &'static Path {
        Path::new("fixture.json")
    }

    fn record(body: &[u8]) -> StoredResponseRecord {
        StoredResponseRecord::new(
            RequestIdentity::new(RequestMethod::Get, "/foo").unwrap(),
            ServerResponse::new(
                200,
                vec![
                    ("Content-Type".into(), "text/plain".into()),
                    ("X-Dup".into(), "1".into()),
                    ("X-Dup".into(), "2".into()),
                ],
                body.to_vec(),
            ),
        )
    }

    #[test]
    fn test_text_body_is_written_as_text() {
        let bytes = record(b"hello").encode().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["body"], "hello");
        assert!(json.get("body_base64").is_none());
        assert_eq!(json["format"], 1);
        assert_eq!(json["method"], "GET");
    }

    #[test]
    fn test_binary_body_round_trips_through_base64() {
        let original = record(&[0xff, 0x00, 0xfe, 0x10]);
        let bytes = original.encode().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json.get("body").is_none());
        assert_eq!(json["body_base64"], "/wD+EA==");

        let decoded = StoredResponseRecord::decode(&bytes, path()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_empty_body_omits_both_fields() {
        let bytes = record(b"").encode().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json.get("body").is_none());
        assert!(json.get("body_base64").is_none());
        let decoded = StoredResponseRecord::decode(&bytes, path()).unwrap();
        assert!(decoded.response.body.is_empty());
    }

    #[test]
    fn test_hand_written_document() {
        let doc = br#"{
            "format": 1,
            "method": "post",
            "uri": "/api/items?b=2&a=1",
            "status": 201
        }"#;
        let decoded = StoredResponseRecord::decode(doc, path()).unwrap();
        assert_eq!(decoded.identity.method(), RequestMethod::Post);
        assert_eq!(decoded.identity.uri(), "/api/items?b=2&a=1");
        assert_eq!(decoded.response.status, 201);
        assert!(decoded.response.headers.is_empty());
    }

    #[test]
    fn test_rejects_garbage() {
        let err = StoredResponseRecord::decode(b"\x00\x01not json", path()).unwrap_err();
        assert!(err.is_corruption(), "unexpected error: {err}");
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let doc = br#"{"format":1,"method":"GET","uri":"/","status":200,"extra":true}"#;
        let err = StoredResponseRecord::decode(doc, path()).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn test_rejects_future_format() {
        let doc = br#"{"format":2,"method":"GET","uri":"/","status":200}"#;
        let err = StoredResponseRecord::decode(doc, path()).unwrap_err();
        assert!(matches!(
            err,
            StoreError::UnsupportedFormat {
                found: 2,
                expected: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_both_body_fields() {
        let doc =
            br#"{"format":1,"method":"GET","uri":"/","status":200,"body":"a","body_base64":"YQ=="}"#;
        let err = StoredResponseRecord::decode(doc, path()).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn test_rejects_bad_status_and_method() {
        let bad_status = br#"{"format":1,"method":"GET","uri":"/","status":42}"#;
        assert!(StoredResponseRecord::decode(bad_status, path()).unwrap_err().is_corruption());

        let bad_method = br#"{"format":1,"method":"FETCH","uri":"/","status":200}"#;
        assert!(StoredResponseRecord::decode(bad_method, path()).unwrap_err().is_corruption());
    }
}
