//! Free-form text fields and their encoding checks
//!
//! Memos, titles, bodies and metadata arrive as raw bytes from the wire
//! decoder. They only become trustworthy strings after [`require_utf8`].

use crate::errors::{Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw byte string as carried by an operation
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Text(#[serde(with = "serde_bytes")] Vec<u8>);

impl Text {
    /// Wrap raw bytes without inspecting them
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Underlying bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the text is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow as `&str` when the bytes are valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(s) => write!(f, "Text({s:?})"),
            None => write!(f, "Text(0x{})", hex::encode(&self.0)),
        }
    }
}

/// Fail unless `bytes` is valid UTF-8
pub fn require_utf8(field: &str, bytes: &[u8]) -> Result<()> {
    std::str::from_utf8(bytes)
        .map(|_| ())
        .map_err(|e| ValidationError::encoding(field, format!("not formatted in UTF8: {e}")))
}

/// Fail unless `bytes` is a syntactically valid JSON document
pub fn require_json(field: &str, bytes: &[u8]) -> Result<()> {
    serde_json::from_slice::<serde::de::IgnoredAny>(bytes)
        .map(|_| ())
        .map_err(|e| ValidationError::encoding(field, format!("not valid JSON: {e}")))
}

/// Optional JSON metadata: empty is fine, otherwise UTF-8 and valid JSON
pub fn validate_json_metadata(field: &str, metadata: &Text) -> Result<()> {
    if metadata.is_empty() {
        return Ok(());
    }
    require_utf8(field, metadata.as_bytes())?;
    require_json(field, metadata.as_bytes())
}
